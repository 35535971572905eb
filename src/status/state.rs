//! Canonical health states and the raw-vocabulary normalizer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical health state of a check or platform.
///
/// The derived `Ord` follows declaration order and only exists so states can
/// key a sorted map. Severity comparisons go through [`HealthState::rank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Degraded,
    Critical,
    Stale,
    Unknown,
}

impl HealthState {
    /// All entity states, in display order.
    pub const ALL: [HealthState; 5] = [
        HealthState::Healthy,
        HealthState::Degraded,
        HealthState::Critical,
        HealthState::Stale,
        HealthState::Unknown,
    ];

    /// Severity rank. Higher is worse.
    pub fn rank(self) -> u8 {
        match self {
            HealthState::Healthy => 0,
            HealthState::Unknown => 1,
            HealthState::Stale => 2,
            HealthState::Degraded => 3,
            HealthState::Critical => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HealthState::Healthy => "healthy",
            HealthState::Degraded => "degraded",
            HealthState::Critical => "critical",
            HealthState::Stale => "stale",
            HealthState::Unknown => "unknown",
        }
    }

    /// Human-readable badge label.
    pub fn label(self) -> &'static str {
        match self {
            HealthState::Healthy => "Healthy",
            HealthState::Degraded => "Degraded",
            HealthState::Critical => "Critical",
            HealthState::Stale => "Stale",
            HealthState::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of the dashboard as a whole.
///
/// Wraps every [`HealthState`] and adds the data-fetch lifecycle states,
/// which never apply to an individual check or platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardState {
    Healthy,
    Degraded,
    Critical,
    Stale,
    Unknown,
    Empty,
    Loading,
    Error,
}

impl DashboardState {
    pub fn as_str(self) -> &'static str {
        match self {
            DashboardState::Healthy => "healthy",
            DashboardState::Degraded => "degraded",
            DashboardState::Critical => "critical",
            DashboardState::Stale => "stale",
            DashboardState::Unknown => "unknown",
            DashboardState::Empty => "empty",
            DashboardState::Loading => "loading",
            DashboardState::Error => "error",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DashboardState::Healthy => "Healthy",
            DashboardState::Degraded => "Degraded",
            DashboardState::Critical => "Critical",
            DashboardState::Stale => "Stale",
            DashboardState::Unknown => "Unknown",
            DashboardState::Empty => "No data",
            DashboardState::Loading => "Loading",
            DashboardState::Error => "Unavailable",
        }
    }

    /// True for the lifecycle states that gate aggregation.
    pub fn is_gated(self) -> bool {
        matches!(self, DashboardState::Loading | DashboardState::Error)
    }
}

impl From<HealthState> for DashboardState {
    fn from(state: HealthState) -> Self {
        match state {
            HealthState::Healthy => DashboardState::Healthy,
            HealthState::Degraded => DashboardState::Degraded,
            HealthState::Critical => DashboardState::Critical,
            HealthState::Stale => DashboardState::Stale,
            HealthState::Unknown => DashboardState::Unknown,
        }
    }
}

impl fmt::Display for DashboardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a raw vendor/check state onto the canonical taxonomy.
///
/// Matching is case-insensitive. Anything not in the synonym table,
/// including an empty or absent value, is `Unknown`.
pub fn normalize_state(raw: Option<&str>) -> HealthState {
    let Some(raw) = raw else {
        return HealthState::Unknown;
    };

    match raw.to_lowercase().as_str() {
        "ok" | "green" | "operational" | "healthy" | "up" => HealthState::Healthy,
        "warning" | "yellow" | "monitoring" | "degraded" => HealthState::Degraded,
        "red" | "critical" | "down" | "outage" => HealthState::Critical,
        _ => HealthState::Unknown,
    }
}

/// Return the more severe of two states. `right` wins only on a strictly
/// higher rank.
pub fn pick_worse_state(left: HealthState, right: HealthState) -> HealthState {
    if right.rank() > left.rank() {
        right
    } else {
        left
    }
}
