// ── Rota domain type ──

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::entity_id::{EntityId, EntityRef};

/// A scheduled shift for one employee at one shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rota {
    #[serde(rename = "_id", alias = "id")]
    pub id: EntityId,
    /// Shift date as sent by the backend (ISO date or timestamp).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee: Option<EntityRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<EntityRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop: Option<EntityRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_id: Option<EntityRef>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Rota {
    pub fn employee_ref(&self) -> Option<&EntityRef> {
        self.employee.as_ref().or(self.employee_id.as_ref())
    }

    pub fn shop_ref(&self) -> Option<&EntityRef> {
        self.shop.as_ref().or(self.shop_id.as_ref())
    }

    /// The calendar date part of `shift_date` (`YYYY-MM-DD`).
    pub fn shift_day(&self) -> Option<&str> {
        self.shift_date.as_deref().map(|d| d.get(..10).unwrap_or(d))
    }

    /// `"09:00 - 17:00"`.
    pub fn shift_window(&self) -> String {
        format!(
            "{} - {}",
            self.scheduled_start.as_deref().unwrap_or("?"),
            self.scheduled_end.as_deref().unwrap_or("?")
        )
    }
}
