use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::entity::{Entity, ProcQuery};

fn default_role() -> String {
    "admin".to_string()
}

/// Links a user to an organization with an administrative role.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrganizationAdmin {
    #[serde(default)]
    pub id: Uuid,
    #[serde(default)]
    pub user_id: Uuid,
    #[serde(default)]
    pub organization_id: Uuid,
    /// "admin" or "manager"
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default = "chrono::Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Entity for OrganizationAdmin {
    const KIND: &'static str = "admin";
    const CREATE_CALL: &'static str = "CALL create_organization_admin($1, $2, $3)";
    const UPDATE_CALL: &'static str = "CALL update_organization_admin($1, $2)";
    const DELETE_CALL: &'static str = "CALL delete_organization_admin($1)";
    const SELECT_BY_ID: &'static str = "SELECT * FROM get_organization_admin_by_id($1)";
    const SELECT_ALL: &'static str = "SELECT * FROM get_all_organization_admins()";

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn stamp_created(&mut self, now: DateTime<Utc>) {
        self.created_at = now;
    }

    // Admin links carry no update timestamp.
    fn touch(&mut self, _now: DateTime<Utc>) {}

    fn bind_create<'q>(&'q self, query: ProcQuery<'q>) -> ProcQuery<'q> {
        query
            .bind(self.user_id)
            .bind(self.organization_id)
            .bind(&self.role)
    }

    fn bind_update<'q>(&'q self, query: ProcQuery<'q>) -> ProcQuery<'q> {
        query.bind(self.id).bind(&self.role)
    }
}
