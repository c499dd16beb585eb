use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{FromRow, Postgres};
use uuid::Uuid;

/// A prepared call against the persistence backend, ready for field binding.
pub type ProcQuery<'q> = Query<'q, Postgres, PgArguments>;

/// Capability trait describing one managed record type to the generic CRUD
/// core: which stored routines persist it, how its fields bind onto them,
/// and which timestamps it tracks.
///
/// Implementations are pure configuration; all behavior lives in the
/// gateway, service, and handler layers that consume this trait.
pub trait Entity:
    Clone
    + Send
    + Sync
    + Unpin
    + Serialize
    + DeserializeOwned
    + for<'r> FromRow<'r, PgRow>
    + 'static
{
    /// Lowercase human name used in log lines and client-facing messages.
    const KIND: &'static str;

    /// `CALL …` statement inserting a record, minus server-generated fields.
    const CREATE_CALL: &'static str;
    /// `CALL …` statement updating a record, keyed by its identifier.
    const UPDATE_CALL: &'static str;
    /// `CALL …` statement soft-deleting a record by identifier.
    const DELETE_CALL: &'static str;
    /// Stored-function point lookup returning the full row.
    const SELECT_BY_ID: &'static str;
    /// Stored-function listing returning all live rows.
    const SELECT_ALL: &'static str;

    fn id(&self) -> Uuid;
    fn set_id(&mut self, id: Uuid);

    /// Set the creation timestamp (and the update timestamp, where tracked).
    fn stamp_created(&mut self, now: DateTime<Utc>);

    /// Set the update timestamp. No-op for records that do not track one.
    fn touch(&mut self, now: DateTime<Utc>);

    /// Bind the fields of [`Entity::CREATE_CALL`] in positional order.
    fn bind_create<'q>(&'q self, query: ProcQuery<'q>) -> ProcQuery<'q>;

    /// Bind the fields of [`Entity::UPDATE_CALL`] in positional order.
    fn bind_update<'q>(&'q self, query: ProcQuery<'q>) -> ProcQuery<'q>;
}
