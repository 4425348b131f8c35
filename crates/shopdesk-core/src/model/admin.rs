// ── Admin domain type ──

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::entity_id::EntityId;
use super::identity::Role;

/// Shop assignment as returned by `GET /admin/with-shops`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminShop {
    #[serde(default, rename = "_id", alias = "id", skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_address: Option<String>,
}

/// A platform user able to log in (`Admin` or `ShopAdmin`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    #[serde(rename = "_id", alias = "id")]
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop: Option<AdminShop>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Admin {
    /// Whether this admin manages a shop.
    pub fn is_assigned(&self) -> bool {
        self.shop
            .as_ref()
            .is_some_and(|s| s.id.is_some() || s.shop_name.is_some())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_admin_with_shop() {
        let a: Admin = serde_json::from_value(json!({
            "_id": "a1",
            "name": "Sam",
            "email": "sam@example.com",
            "role": "ShopAdmin",
            "shop": { "shopName": "Corner", "shopLogo": null, "shopAddress": "1 High St" }
        }))
        .unwrap();
        assert_eq!(a.role, Some(Role::ShopAdmin));
        assert!(a.is_assigned());
        assert_eq!(a.shop.unwrap().shop_address.as_deref(), Some("1 High St"));
    }

    #[test]
    fn unassigned_admin() {
        let a: Admin = serde_json::from_value(json!({
            "_id": "a2", "name": "Kim", "email": "kim@example.com", "shop": null
        }))
        .unwrap();
        assert!(!a.is_assigned());
    }
}
