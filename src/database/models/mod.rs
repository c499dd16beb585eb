mod admin;
mod billing;
mod branding;
mod organization;
mod tutor;

pub use admin::OrganizationAdmin;
pub use billing::OrganizationBilling;
pub use branding::{BrandingTheme, OrganizationBranding};
pub use organization::{Organization, OrganizationStatus, PlanTier};
pub use tutor::OrganizationTutor;
