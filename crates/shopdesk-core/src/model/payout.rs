// ── Payout domain type ──

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::entity_id::{EntityId, EntityRef};
use super::lenient;

/// An amount paid to an employee for a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payout {
    #[serde(rename = "_id", alias = "id")]
    pub id: EntityId,
    #[serde(default, deserialize_with = "lenient::opt_f64", skip_serializing_if = "Option::is_none")]
    pub amount_paid: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payout_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payout_start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payout_end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee: Option<EntityRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<EntityRef>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Payout {
    pub fn employee_ref(&self) -> Option<&EntityRef> {
        self.employee.as_ref().or(self.employee_id.as_ref())
    }
}
