use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::entity::{Entity, ProcQuery};

/// Maps a tutor to an organization; an organization admin must approve the
/// tutor before they can teach.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrganizationTutor {
    #[serde(default)]
    pub id: Uuid,
    #[serde(default)]
    pub user_id: Uuid,
    #[serde(default)]
    pub organization_id: Uuid,
    #[serde(default)]
    pub approved: bool,
    #[serde(default = "chrono::Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Entity for OrganizationTutor {
    const KIND: &'static str = "tutor";
    const CREATE_CALL: &'static str = "CALL create_organization_tutor($1, $2, $3)";
    const UPDATE_CALL: &'static str = "CALL update_organization_tutor($1, $2)";
    const DELETE_CALL: &'static str = "CALL delete_organization_tutor($1)";
    const SELECT_BY_ID: &'static str = "SELECT * FROM get_organization_tutor_by_id($1)";
    const SELECT_ALL: &'static str = "SELECT * FROM get_all_organization_tutors()";

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn stamp_created(&mut self, now: DateTime<Utc>) {
        self.created_at = now;
    }

    // Tutor links carry no update timestamp.
    fn touch(&mut self, _now: DateTime<Utc>) {}

    fn bind_create<'q>(&'q self, query: ProcQuery<'q>) -> ProcQuery<'q> {
        query
            .bind(self.user_id)
            .bind(self.organization_id)
            .bind(self.approved)
    }

    fn bind_update<'q>(&'q self, query: ProcQuery<'q>) -> ProcQuery<'q> {
        query.bind(self.id).bind(self.approved)
    }
}
