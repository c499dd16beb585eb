use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::database::entity::Entity;
use crate::database::gateway::{EntityRepository, RepositoryError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{kind} not found with id {id}")]
    NotFound {
        kind: &'static str,
        id: Uuid,
        #[source]
        source: RepositoryError,
    },

    #[error("failed to create {kind}: {source}")]
    Create {
        kind: &'static str,
        #[source]
        source: RepositoryError,
    },

    #[error("failed to update {kind} with id {id}: {source}")]
    Update {
        kind: &'static str,
        id: Uuid,
        #[source]
        source: RepositoryError,
    },

    #[error("failed to delete {kind} with id {id}: {source}")]
    Delete {
        kind: &'static str,
        id: Uuid,
        #[source]
        source: RepositoryError,
    },

    #[error("failed to fetch {kind} with id {id}: {source}")]
    Fetch {
        kind: &'static str,
        id: Uuid,
        #[source]
        source: RepositoryError,
    },

    #[error("failed to list {kind} records: {source}")]
    List {
        kind: &'static str,
        #[source]
        source: RepositoryError,
    },
}

impl ServiceError {
    /// True when the failure means the target record does not exist (or is
    /// soft-deleted), as opposed to a backend fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound { .. })
    }
}

/// Business façade over one record type: assigns identifiers and
/// timestamps, pre-checks existence before mutations, and wraps gateway
/// failures with operation context.
pub struct EntityService<E: Entity> {
    repo: Arc<dyn EntityRepository<E>>,
}

impl<E: Entity> Clone for EntityService<E> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<E: Entity> EntityService<E> {
    pub fn new(repo: Arc<dyn EntityRepository<E>>) -> Self {
        Self { repo }
    }

    /// Persist a new record: fresh v4 identifier, timestamps set to now.
    pub async fn create(&self, mut draft: E) -> Result<E, ServiceError> {
        let id = Uuid::new_v4();
        draft.set_id(id);
        draft.stamp_created(Utc::now());

        tracing::info!(kind = E::KIND, %id, "creating record");

        self.repo
            .create(&draft)
            .await
            .map_err(|source| ServiceError::Create {
                kind: E::KIND,
                source,
            })?;

        Ok(draft)
    }

    /// Update an existing record.
    ///
    /// The existence pre-check is optimistic: a record deleted between the
    /// check and the update call is not detected here, the backend's own
    /// concurrency control owns that window.
    pub async fn update(&self, mut entity: E) -> Result<(), ServiceError> {
        entity.touch(Utc::now());
        let id = entity.id();

        if let Err(source) = self.repo.get_by_id(id).await {
            return Err(ServiceError::NotFound {
                kind: E::KIND,
                id,
                source,
            });
        }

        self.repo
            .update(&entity)
            .await
            .map_err(|source| ServiceError::Update {
                kind: E::KIND,
                id,
                source,
            })?;

        tracing::info!(kind = E::KIND, %id, "record updated");
        Ok(())
    }

    /// Soft-delete a record, with the same existence pre-check as update.
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if let Err(source) = self.repo.get_by_id(id).await {
            return Err(ServiceError::NotFound {
                kind: E::KIND,
                id,
                source,
            });
        }

        self.repo
            .delete(id)
            .await
            .map_err(|source| ServiceError::Delete {
                kind: E::KIND,
                id,
                source,
            })?;

        tracing::info!(kind = E::KIND, %id, "record soft-deleted");
        Ok(())
    }

    pub async fn get(&self, id: Uuid) -> Result<E, ServiceError> {
        self.repo.get_by_id(id).await.map_err(|source| {
            if matches!(source, RepositoryError::NotFound) {
                ServiceError::NotFound {
                    kind: E::KIND,
                    id,
                    source,
                }
            } else {
                ServiceError::Fetch {
                    kind: E::KIND,
                    id,
                    source,
                }
            }
        })
    }

    pub async fn get_all(&self) -> Result<Vec<E>, ServiceError> {
        self.repo
            .get_all()
            .await
            .map_err(|source| ServiceError::List {
                kind: E::KIND,
                source,
            })
    }
}
