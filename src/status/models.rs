//! Raw records as returned by the status backend.
//!
//! Fields the backend may omit or send as `null` are `Option`s. Unknown
//! extra fields are ignored.

use serde::{Deserialize, Serialize};

/// A monitored platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Platform {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// A raw status check reported for one platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusCheck {
    pub id: String,
    pub platform_id: String,
    pub name: String,
    /// Raw vendor state, e.g. "ok", "yellow", "outage".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freshness_minutes: Option<Minutes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sla_minutes: Option<Minutes>,
}

/// A computed result for a platform, used when it has no checks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusResult {
    pub id: String,
    pub platform_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// An advisory message. No `platform_id` means global scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusMessage {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_id: Option<String>,
    /// Publication state; only "published" messages are shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    pub title: String,
    pub body_md: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// A minute count exactly as the backend sent it.
///
/// Keeps present-but-invalid values (`"soon"`, `true`) apart from absent
/// ones, which are `None` on the owning record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Minutes {
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

impl From<i64> for Minutes {
    fn from(n: i64) -> Self {
        Minutes::Number(n.into())
    }
}

impl Minutes {
    /// The numeric value, if it is a finite number or a string holding one.
    pub fn value(&self) -> Option<f64> {
        let n = match self {
            Minutes::Number(n) => n.as_f64()?,
            Minutes::Text(s) => s.trim().parse::<f64>().ok()?,
            Minutes::Other(_) => return None,
        };
        n.is_finite().then_some(n)
    }
}
