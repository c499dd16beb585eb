use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use clap::Parser;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use elearn_api::auth::{AuthState, PgTokenStore, TokenStore};
use elearn_api::config::AppConfig;
use elearn_api::database;
use elearn_api::database::entity::Entity;
use elearn_api::database::gateway::{EntityRepository, ProcedureGateway};
use elearn_api::database::models::{
    Organization, OrganizationAdmin, OrganizationBilling, OrganizationBranding, OrganizationTutor,
};
use elearn_api::handlers::resource_routes;
use elearn_api::services::EntityService;

#[derive(Debug, Parser)]
#[command(name = "elearn-api", version, about = "E-learning administration backend")]
struct Args {
    /// Path to the YAML configuration file
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,

    /// Override the configured listen port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so DATABASE_URL and friends are picked up.
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load(&args.config)?;
    tracing::info!(env = %config.app.env, "starting elearn API");

    let pool = database::connect(&config.database).await?;
    let app = app(pool.clone());

    let port = args.port.unwrap_or(config.app.port);
    let bind_addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}

fn app(pool: PgPool) -> Router {
    let auth = AuthState {
        tokens: Arc::new(PgTokenStore::new(pool.clone())) as Arc<dyn TokenStore>,
    };

    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .with_state(pool.clone())
        // Authenticated resource groups
        .nest("/organizations", resources::<Organization>(&pool, &auth))
        .nest(
            "/organization-admins",
            resources::<OrganizationAdmin>(&pool, &auth),
        )
        .nest(
            "/organization-tutors",
            resources::<OrganizationTutor>(&pool, &auth),
        )
        .nest(
            "/organization-brandings",
            resources::<OrganizationBranding>(&pool, &auth),
        )
        .nest(
            "/organization-billings",
            resources::<OrganizationBilling>(&pool, &auth),
        )
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn resources<E: Entity>(pool: &PgPool, auth: &AuthState) -> Router {
    let repo: Arc<dyn EntityRepository<E>> = Arc::new(ProcedureGateway::<E>::new(pool.clone()));
    resource_routes(EntityService::new(repo), auth.clone())
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "resources": [
            "/organizations",
            "/organization-admins",
            "/organization-tutors",
            "/organization-brandings",
            "/organization-billings",
        ],
    }))
}

async fn health(State(pool): State<PgPool>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match database::health_check(&pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(err) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": err.to_string()
            })),
        ),
    }
}
