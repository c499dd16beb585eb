//! Generic REST handlers for the managed record types.
//!
//! One set of handlers serves every resource group; the [`Entity`]
//! implementation supplies the per-type differences. Status mapping:
//! the controller layer alone decides HTTP codes, and only the point
//! lookup masks backend detail behind a generic message.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{middleware, Json, Router};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::AuthState;
use crate::database::entity::Entity;
use crate::error::ApiError;
use crate::middleware::auth::require_bearer;
use crate::services::EntityService;

/// Build the authenticated five-route router for one resource group.
pub fn resource_routes<E: Entity>(service: EntityService<E>, auth: AuthState) -> Router {
    Router::new()
        .route("/", get(index::<E>).post(create::<E>))
        .route(
            "/:id",
            get(show::<E>).put(update::<E>).delete(destroy::<E>),
        )
        .route_layer(middleware::from_fn_with_state(auth, require_bearer))
        .with_state(service)
}

fn parse_id<E: Entity>(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw)
        .map_err(|_| ApiError::bad_request(format!("invalid {} ID", E::KIND)))
}

/// POST /{resource} - create a record from a draft body
async fn create<E: Entity>(
    State(service): State<EntityService<E>>,
    payload: Result<Json<E>, JsonRejection>,
) -> Result<Json<E>, ApiError> {
    let Json(draft) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let created = service
        .create(draft)
        .await
        .map_err(|err| ApiError::internal_server_error(err.to_string()))?;

    Ok(Json(created))
}

/// PUT /{resource}/:id - update a record; the path id is authoritative
async fn update<E: Entity>(
    State(service): State<EntityService<E>>,
    Path(id): Path<String>,
    payload: Result<Json<E>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id::<E>(&id)?;
    let Json(mut entity) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    entity.set_id(id);

    service
        .update(entity)
        .await
        .map_err(|err| ApiError::internal_server_error(err.to_string()))?;

    Ok(Json(json!({
        "message": format!("{} updated successfully", E::KIND)
    })))
}

/// DELETE /{resource}/:id - soft-delete a record
async fn destroy<E: Entity>(
    State(service): State<EntityService<E>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id::<E>(&id)?;

    service
        .delete(id)
        .await
        .map_err(|err| ApiError::internal_server_error(err.to_string()))?;

    Ok(Json(json!({
        "message": format!("{} deleted successfully", E::KIND)
    })))
}

/// GET /{resource}/:id - fetch a single record
async fn show<E: Entity>(
    State(service): State<EntityService<E>>,
    Path(id): Path<String>,
) -> Result<Json<E>, ApiError> {
    let id = parse_id::<E>(&id)?;

    match service.get(id).await {
        Ok(entity) => Ok(Json(entity)),
        Err(err) if err.is_not_found() => {
            Err(ApiError::not_found(format!("{} not found", E::KIND)))
        }
        Err(err) => {
            tracing::error!(kind = E::KIND, %id, error = %err, "unexpected error fetching record");
            Err(ApiError::internal_server_error("internal error"))
        }
    }
}

/// GET /{resource} - list all live records
async fn index<E: Entity>(
    State(service): State<EntityService<E>>,
) -> Result<Json<Vec<E>>, ApiError> {
    service
        .get_all()
        .await
        .map(Json)
        .map_err(|err| ApiError::internal_server_error(err.to_string()))
}
