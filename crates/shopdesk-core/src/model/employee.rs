// ── Employee domain type ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString};

use super::entity_id::{EntityId, EntityRef};
use super::lenient;

/// How an employee's salary is computed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum PayType {
    #[serde(rename = "Fixed Daily")]
    #[strum(to_string = "Fixed Daily", serialize = "fixed-daily", serialize = "daily")]
    FixedDaily,
    #[serde(rename = "Hourly")]
    #[strum(to_string = "Hourly", serialize = "hourly")]
    Hourly,
    #[serde(other)]
    #[strum(to_string = "Unknown")]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(rename = "_id", alias = "id")]
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// National Insurance number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ni_number: Option<String>,
    /// Right-to-work share code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_timing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pay_type: Option<PayType>,
    #[serde(default, deserialize_with = "lenient::opt_f64", skip_serializing_if = "Option::is_none")]
    pub fixed_daily_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64", skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64", skip_serializing_if = "Option::is_none")]
    pub custom_daily_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64", skip_serializing_if = "Option::is_none")]
    pub custom_hourly_rate: Option<f64>,
    /// Populated shop document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop: Option<EntityRef>,
    /// Raw shop reference, as echoed from create/update payloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_id: Option<EntityRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Employee {
    /// The shop reference, whichever form the backend returned.
    pub fn shop_ref(&self) -> Option<&EntityRef> {
        self.shop.as_ref().or(self.shop_id.as_ref())
    }

    /// The rate that applies to this employee's pay type, custom rates first.
    pub fn effective_rate(&self) -> Option<f64> {
        match self.pay_type? {
            PayType::Hourly => self.custom_hourly_rate.or(self.hourly_rate),
            PayType::FixedDaily => self.custom_daily_rate.or(self.fixed_daily_rate),
            PayType::Unknown => None,
        }
    }
}
