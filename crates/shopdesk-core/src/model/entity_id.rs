// ── Core identity types ──
//
// Backend records are keyed by an opaque `_id` string. References to other
// records arrive either as that bare id or as a populated sub-document.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ── EntityId ────────────────────────────────────────────────────────

/// Canonical identifier for any backend record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ── EntityRef ───────────────────────────────────────────────────────

/// Summary of a populated reference (`{"_id": .., "name": .., ...}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefSummary {
    #[serde(rename = "_id", alias = "id")]
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A reference to another record: either its id or the populated document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityRef {
    Id(EntityId),
    Expanded(RefSummary),
}

impl EntityRef {
    pub fn id(&self) -> &EntityId {
        match self {
            Self::Id(id) => id,
            Self::Expanded(summary) => &summary.id,
        }
    }

    /// Display name, when the reference was populated.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Id(_) => None,
            Self::Expanded(summary) => summary.name.as_deref(),
        }
    }

    /// Name if populated, otherwise the raw id.
    pub fn label(&self) -> String {
        self.name()
            .map_or_else(|| self.id().to_string(), ToOwned::to_owned)
    }
}

impl From<EntityId> for EntityRef {
    fn from(id: EntityId) -> Self {
        Self::Id(id)
    }
}
