use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::database::entity::Entity;

/// Errors from the persistence gateway
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// CRUD contract for one record type, generic so services can run against
/// the stored-procedure gateway in production and an in-memory double in
/// tests.
#[async_trait]
pub trait EntityRepository<E: Entity>: Send + Sync {
    async fn create(&self, entity: &E) -> Result<(), RepositoryError>;
    async fn update(&self, entity: &E) -> Result<(), RepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
    async fn get_by_id(&self, id: Uuid) -> Result<E, RepositoryError>;
    async fn get_all(&self) -> Result<Vec<E>, RepositoryError>;
}

/// Stored-procedure adapter: every call is a single round trip to the
/// backend, failures are returned to the caller untouched, and a zero-row
/// point lookup is surfaced as [`RepositoryError::NotFound`].
pub struct ProcedureGateway<E> {
    pool: PgPool,
    _entity: PhantomData<fn() -> E>,
}

impl<E> ProcedureGateway<E> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E: Entity> EntityRepository<E> for ProcedureGateway<E> {
    async fn create(&self, entity: &E) -> Result<(), RepositoryError> {
        if let Err(err) = entity
            .bind_create(sqlx::query(E::CREATE_CALL))
            .execute(&self.pool)
            .await
        {
            tracing::error!(kind = E::KIND, id = %entity.id(), error = %err, "create procedure failed");
            return Err(err.into());
        }
        Ok(())
    }

    async fn update(&self, entity: &E) -> Result<(), RepositoryError> {
        if let Err(err) = entity
            .bind_update(sqlx::query(E::UPDATE_CALL))
            .execute(&self.pool)
            .await
        {
            tracing::error!(kind = E::KIND, id = %entity.id(), error = %err, "update procedure failed");
            return Err(err.into());
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        if let Err(err) = sqlx::query(E::DELETE_CALL).bind(id).execute(&self.pool).await {
            tracing::error!(kind = E::KIND, %id, error = %err, "delete procedure failed");
            return Err(err.into());
        }
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<E, RepositoryError> {
        match sqlx::query_as::<_, E>(E::SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
        {
            Ok(Some(row)) => Ok(row),
            Ok(None) => {
                tracing::warn!(kind = E::KIND, %id, "record not found");
                Err(RepositoryError::NotFound)
            }
            Err(err) => {
                tracing::error!(kind = E::KIND, %id, error = %err, "point lookup failed");
                Err(err.into())
            }
        }
    }

    async fn get_all(&self) -> Result<Vec<E>, RepositoryError> {
        match sqlx::query_as::<_, E>(E::SELECT_ALL).fetch_all(&self.pool).await {
            Ok(rows) => Ok(rows),
            Err(err) => {
                tracing::error!(kind = E::KIND, error = %err, "listing failed");
                Err(err.into())
            }
        }
    }
}
