#![allow(dead_code)]

//! Shared harness for the route-level tests: wires the real routers over
//! in-memory backends so the full request path (auth gate included) runs
//! without a live database.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use elearn_api::auth::{AuthIdentity, AuthState, TokenError, TokenStore};
use elearn_api::database::entity::Entity;
use elearn_api::database::gateway::{EntityRepository, RepositoryError};
use elearn_api::database::models::{
    Organization, OrganizationAdmin, OrganizationBilling, OrganizationBranding, OrganizationTutor,
};
use elearn_api::handlers::resource_routes;
use elearn_api::services::EntityService;

pub const TOKEN: &str = "integration-token";
pub const EXPIRED_TOKEN: &str = "stale-token";

pub struct MemoryRepository<E> {
    rows: Mutex<HashMap<Uuid, E>>,
    update_calls: AtomicUsize,
    failing: AtomicBool,
}

impl<E> MemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(HashMap::new()),
            update_calls: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(RepositoryError::Sqlx(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl<E: Entity> EntityRepository<E> for MemoryRepository<E> {
    async fn create(&self, entity: &E) -> Result<(), RepositoryError> {
        self.check()?;
        self.rows.lock().unwrap().insert(entity.id(), entity.clone());
        Ok(())
    }

    async fn update(&self, entity: &E) -> Result<(), RepositoryError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.rows.lock().unwrap().insert(entity.id(), entity.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.check()?;
        self.rows.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<E, RepositoryError> {
        self.check()?;
        self.rows
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn get_all(&self) -> Result<Vec<E>, RepositoryError> {
        self.check()?;
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }
}

struct StaticTokenStore {
    valid: HashMap<String, Uuid>,
    expired: HashSet<String>,
}

#[async_trait]
impl TokenStore for StaticTokenStore {
    async fn validate(&self, token: &str) -> Result<AuthIdentity, TokenError> {
        if self.expired.contains(token) {
            return Err(TokenError::Expired);
        }
        match self.valid.get(token) {
            Some(&user_id) => Ok(AuthIdentity { user_id }),
            None => Err(TokenError::Unknown),
        }
    }
}

/// Handles onto the in-memory backends, for seeding and fault injection.
pub struct TestBackend {
    pub organizations: Arc<MemoryRepository<Organization>>,
    pub admins: Arc<MemoryRepository<OrganizationAdmin>>,
    pub tutors: Arc<MemoryRepository<OrganizationTutor>>,
    pub brandings: Arc<MemoryRepository<OrganizationBranding>>,
    pub billings: Arc<MemoryRepository<OrganizationBilling>>,
}

pub fn test_app() -> (Router, TestBackend) {
    let auth = AuthState {
        tokens: Arc::new(StaticTokenStore {
            valid: HashMap::from([(TOKEN.to_string(), Uuid::new_v4())]),
            expired: HashSet::from([EXPIRED_TOKEN.to_string()]),
        }),
    };

    let backend = TestBackend {
        organizations: Arc::new(MemoryRepository::new()),
        admins: Arc::new(MemoryRepository::new()),
        tutors: Arc::new(MemoryRepository::new()),
        brandings: Arc::new(MemoryRepository::new()),
        billings: Arc::new(MemoryRepository::new()),
    };

    let router = Router::new()
        .nest(
            "/organizations",
            routes(backend.organizations.clone(), &auth),
        )
        .nest("/organization-admins", routes(backend.admins.clone(), &auth))
        .nest("/organization-tutors", routes(backend.tutors.clone(), &auth))
        .nest(
            "/organization-brandings",
            routes(backend.brandings.clone(), &auth),
        )
        .nest(
            "/organization-billings",
            routes(backend.billings.clone(), &auth),
        );

    (router, backend)
}

fn routes<E: Entity>(repo: Arc<MemoryRepository<E>>, auth: &AuthState) -> Router {
    let repo: Arc<dyn EntityRepository<E>> = repo;
    resource_routes(EntityService::new(repo), auth.clone())
}

/// Issue a request against the router and decode the JSON response.
pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

/// Shorthand for an authenticated request.
pub async fn authed(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    request(app, method, uri, Some(TOKEN), body).await
}
