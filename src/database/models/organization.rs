use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::entity::{Entity, ProcQuery};

/// Lifecycle state of an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "organization_status", rename_all = "lowercase")]
pub enum OrganizationStatus {
    #[default]
    Pending,
    Active,
    Suspended,
}

/// Subscription tier, shared by organizations and their billing records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
pub enum PlanTier {
    #[default]
    Free,
    Pro,
    Enterprise,
}

/// Core record for each tenant organization.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Organization {
    #[serde(default)]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub logo_url: String,
    #[serde(default)]
    pub primary_color: String,
    #[serde(default)]
    pub secondary_color: String,
    /// Custom subdomain/domain, unique across organizations.
    pub domain: String,
    #[serde(default)]
    pub status: OrganizationStatus,
    #[serde(default)]
    pub plan: PlanTier,
    #[serde(default = "chrono::Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "chrono::Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Entity for Organization {
    const KIND: &'static str = "organization";
    const CREATE_CALL: &'static str = "CALL create_organization($1, $2, $3, $4, $5, $6, $7, $8)";
    const UPDATE_CALL: &'static str =
        "CALL update_organization($1, $2, $3, $4, $5, $6, $7, $8, $9)";
    const DELETE_CALL: &'static str = "CALL delete_organization($1)";
    const SELECT_BY_ID: &'static str = "SELECT * FROM get_organization_by_id($1)";
    const SELECT_ALL: &'static str = "SELECT * FROM get_all_organizations()";

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn stamp_created(&mut self, now: DateTime<Utc>) {
        self.created_at = now;
        self.updated_at = now;
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn bind_create<'q>(&'q self, query: ProcQuery<'q>) -> ProcQuery<'q> {
        query
            .bind(&self.name)
            .bind(&self.description)
            .bind(&self.logo_url)
            .bind(&self.primary_color)
            .bind(&self.secondary_color)
            .bind(&self.domain)
            .bind(self.status)
            .bind(self.plan)
    }

    fn bind_update<'q>(&'q self, query: ProcQuery<'q>) -> ProcQuery<'q> {
        query
            .bind(self.id)
            .bind(&self.name)
            .bind(&self.description)
            .bind(&self.logo_url)
            .bind(&self.primary_color)
            .bind(&self.secondary_color)
            .bind(&self.domain)
            .bind(self.status)
            .bind(self.plan)
    }
}
