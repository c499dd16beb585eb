use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::entity::{Entity, ProcQuery};
use crate::database::models::PlanTier;

/// Subscription and payment state, one record per organization.
///
/// The creation procedure does not accept `next_billing_at`; the backend
/// assigns the first billing date, and later updates may move it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrganizationBilling {
    #[serde(default)]
    pub id: Uuid,
    #[serde(default)]
    pub organization_id: Uuid,
    #[serde(default)]
    pub plan: PlanTier,
    /// "Stripe", "PayPal", "Local", ...
    #[serde(default)]
    pub payment_method: String,
    /// External payment-provider subscription id
    #[serde(default)]
    pub subscription_id: String,
    #[serde(default)]
    pub next_billing_at: Option<DateTime<Utc>>,
    #[serde(default = "chrono::Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "chrono::Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Entity for OrganizationBilling {
    const KIND: &'static str = "billing";
    const CREATE_CALL: &'static str = "CALL create_organization_billing($1, $2, $3, $4)";
    const UPDATE_CALL: &'static str = "CALL update_organization_billing($1, $2, $3, $4, $5)";
    const DELETE_CALL: &'static str = "CALL delete_organization_billing($1)";
    const SELECT_BY_ID: &'static str = "SELECT * FROM get_organization_billing_by_id($1)";
    const SELECT_ALL: &'static str = "SELECT * FROM get_all_organization_billings()";

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
            .bind(self.plan)
            .bind(&self.payment_method)
            .bind(&self.subscription_id)
    }

    fn bind_update<'q>(&'q self, query: ProcQuery<'q>) -> ProcQuery<'q> {
        query
            .bind(self.id)
            .bind(self.plan)
            .bind(&self.payment_method)
            .bind(&self.subscription_id)
            .bind(self.next_billing_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn billing_defaults_to_free_with_no_billing_date() {
        let billing: OrganizationBilling = serde_json::from_value(json!({
            "organization_id": "2d9a1f60-3d7d-47f3-8b6c-55b9a8a1c111",
            "payment_method": "Stripe"
        }))
        .unwrap();
        assert_eq!(billing.plan, PlanTier::Free);
        assert!(billing.next_billing_at.is_none());
        assert_eq!(billing.subscription_id, "");
    }
}
