//! Shared test doubles for the service and middleware layers.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::{AuthIdentity, TokenError, TokenStore};
use crate::database::entity::Entity;
use crate::database::gateway::{EntityRepository, RepositoryError};

/// In-memory stand-in for the stored-procedure gateway. Records mutation
/// calls so tests can assert that pre-checks short-circuit, and can be
/// switched into a failing mode to simulate backend faults.
pub struct MemoryRepository<E> {
    rows: Mutex<HashMap<Uuid, E>>,
    update_calls: AtomicUsize,
    delete_calls: AtomicUsize,
    failing: AtomicBool,
}

impl<E> MemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(HashMap::new()),
            update_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(RepositoryError::Sqlx(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

impl<E> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self::new()
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
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
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

/// Token store with a fixed set of valid and expired credentials.
pub struct StaticTokenStore {
    valid: HashMap<String, Uuid>,
    expired: HashSet<String>,
}

impl StaticTokenStore {
    pub fn with_token(token: &str, user_id: Uuid) -> Self {
        Self {
            valid: HashMap::from([(token.to_string(), user_id)]),
            expired: HashSet::new(),
        }
    }

    pub fn expire(&mut self, token: &str) {
        self.expired.insert(token.to_string());
    }
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
