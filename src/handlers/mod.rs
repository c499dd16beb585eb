pub mod resources;

pub use resources::resource_routes;
