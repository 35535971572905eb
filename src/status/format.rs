//! Display strings for timestamps and dashboard states.

use serde::Serialize;

use super::state::DashboardState;

pub const NOT_AVAILABLE: &str = "Not available";

/// Render a backend timestamp for humans.
///
/// ISO-8601 values have their `T` and `Z` markers spelled out
/// (`2024-07-12T09:15:00Z` → `2024-07-12 09:15:00 UTC`); anything else is
/// shown as-is.
pub fn format_timestamp(value: Option<&str>) -> String {
    match value {
        None | Some("") => NOT_AVAILABLE.to_string(),
        Some(v) if v.contains('T') => v.replacen('T', " ", 1).replacen('Z', " UTC", 1),
        Some(v) => v.to_string(),
    }
}

/// Label for a message's active window, if it has one.
pub fn format_date_range(start_at: Option<&str>, end_at: Option<&str>) -> Option<String> {
    let start_at = start_at.filter(|s| !s.is_empty());
    let end_at = end_at.filter(|s| !s.is_empty());

    match (start_at, end_at) {
        (None, None) => None,
        (Some(start), Some(end)) => Some(format!(
            "{} - {}",
            format_timestamp(Some(start)),
            format_timestamp(Some(end))
        )),
        (Some(start), None) => Some(format!("Starts {}", format_timestamp(Some(start)))),
        (None, Some(end)) => Some(format!("Ends {}", format_timestamp(Some(end)))),
    }
}

/// Headline copy for the global summary panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Headline {
    pub title: &'static str,
    pub message: String,
    pub label: &'static str,
}

impl Headline {
    /// Copy for `state`. A fetch error message replaces the default text.
    pub fn for_state(state: DashboardState, error: Option<&str>) -> Self {
        let (title, message) = match state {
            DashboardState::Healthy => (
                "All systems healthy",
                "Status checks are within SLA across the platform.",
            ),
            DashboardState::Degraded => (
                "Degraded performance",
                "Some platforms are reporting warnings or partial outages.",
            ),
            DashboardState::Critical => (
                "Major incident",
                "Critical issues detected. Escalation in progress.",
            ),
            DashboardState::Stale => (
                "Signals delayed",
                "Freshness SLA is breached for one or more checks.",
            ),
            DashboardState::Unknown => (
                "Visibility limited",
                "Waiting on fresh status signals from ingestion.",
            ),
            DashboardState::Empty => (
                "No status data yet",
                "Status checks will appear once ingestion starts.",
            ),
            DashboardState::Loading => ("Loading status signals", "Pulling the latest checks now."),
            DashboardState::Error => (
                "Status feed unavailable",
                "We could not reach the status APIs.",
            ),
        };

        Self {
            title,
            message: error.filter(|e| !e.is_empty()).unwrap_or(message).to_string(),
            label: state.label(),
        }
    }
}
