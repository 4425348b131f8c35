// ── Shop domain type ──

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::entity_id::{EntityId, EntityRef};
use super::lenient;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    #[serde(rename = "_id", alias = "id")]
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Free-form site / location label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64", skip_serializing_if = "Option::is_none")]
    pub rent: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64", skip_serializing_if = "Option::is_none")]
    pub bills: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_open_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_close_time: Option<String>,
    /// Logo URL as hosted by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    /// The ShopAdmin managing this shop.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<EntityRef>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Shop {
    /// `"09:00 - 17:00"` style opening hours, when both ends are known.
    pub fn opening_hours(&self) -> Option<String> {
        match (&self.shop_open_time, &self.shop_close_time) {
            (Some(open), Some(close)) => Some(format!("{open} - {close}")),
            _ => None,
        }
    }
}
