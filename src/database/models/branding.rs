use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::entity::{Entity, ProcQuery};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
pub enum BrandingTheme {
    #[default]
    Light,
    Dark,
    Custom,
}

/// Advanced branding configuration, one record per organization.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrganizationBranding {
    #[serde(default)]
    pub id: Uuid,
    #[serde(default)]
    pub organization_id: Uuid,
    #[serde(default)]
    pub logo_url: String,
    #[serde(default)]
    pub primary_color: String,
    #[serde(default)]
    pub secondary_color: String,
    #[serde(default)]
    pub theme: BrandingTheme,
    /// HTML email template
    #[serde(default)]
    pub email_template: String,
    #[serde(default = "chrono::Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "chrono::Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Entity for OrganizationBranding {
    const KIND: &'static str = "branding";
    const CREATE_CALL: &'static str =
        "CALL create_organization_branding($1, $2, $3, $4, $5, $6)";
    const UPDATE_CALL: &'static str =
        "CALL update_organization_branding($1, $2, $3, $4, $5, $6)";
    const DELETE_CALL: &'static str = "CALL delete_organization_branding($1)";
    const SELECT_BY_ID: &'static str = "SELECT * FROM get_organization_branding_by_id($1)";
    const SELECT_ALL: &'static str = "SELECT * FROM get_all_organization_brandings()";

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
            .bind(self.organization_id)
            .bind(&self.logo_url)
            .bind(&self.primary_color)
            .bind(&self.secondary_color)
            .bind(self.theme)
            .bind(&self.email_template)
    }

    fn bind_update<'q>(&'q self, query: ProcQuery<'q>) -> ProcQuery<'q> {
        query
            .bind(self.id)
            .bind(&self.logo_url)
            .bind(&self.primary_color)
            .bind(&self.secondary_color)
            .bind(self.theme)
            .bind(&self.email_template)
    }
}
