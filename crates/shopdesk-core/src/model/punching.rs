// ── Punching domain type ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::entity_id::{EntityId, EntityRef};

/// A clock-in / clock-out record. `punch_out_datetime` is absent while open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Punching {
    #[serde(rename = "_id", alias = "id")]
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub punch_in_datetime: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub punch_out_datetime: Option<DateTime<Utc>>,
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

impl Punching {
    pub fn employee_ref(&self) -> Option<&EntityRef> {
        self.employee.as_ref().or(self.employee_id.as_ref())
    }

    pub fn shop_ref(&self) -> Option<&EntityRef> {
        self.shop.as_ref().or(self.shop_id.as_ref())
    }

    pub fn is_open(&self) -> bool {
        self.punch_in_datetime.is_some() && self.punch_out_datetime.is_none()
    }

    /// Worked hours, once punched out.
    pub fn hours(&self) -> Option<f64> {
        let (start, end) = (self.punch_in_datetime?, self.punch_out_datetime?);
        #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
        Some((end - start).num_seconds() as f64 / 3600.0)
    }
}
