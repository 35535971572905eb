//! Per-check decoration and the per-platform check rollup.

use serde::Serialize;

use super::models::StatusCheck;
use super::staleness::is_stale;
use super::state::{normalize_state, pick_worse_state, HealthState};

pub const NOTE_NO_CHECKS: &str = "No checks reported yet.";
pub const NOTE_ALL_WITHIN_SLA: &str = "All checks within SLA.";
pub const NOTE_MONITORING: &str = "Monitoring platform signals.";

/// A raw check with its derived state attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckSummary {
    #[serde(flatten)]
    pub check: StatusCheck,
    /// `Stale` when past SLA, otherwise the normalized raw state.
    pub derived_state: HealthState,
    pub is_stale: bool,
}

/// Folded view of one platform's checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckRollup {
    pub note: String,
    pub state: HealthState,
    pub stale_count: usize,
}

pub fn summarize_check(check: &StatusCheck) -> CheckSummary {
    let stale = is_stale(check);
    let derived_state = if stale {
        HealthState::Stale
    } else {
        normalize_state(check.state.as_deref())
    };

    CheckSummary {
        check: check.clone(),
        derived_state,
        is_stale: stale,
    }
}

/// Fold a platform's check summaries into a note, a state and a stale count.
///
/// The note prefers, in order: a staleness notice when everything else is
/// healthy, the message of the most severe check, then a generic line.
pub fn summarize_checks(summaries: &[CheckSummary]) -> CheckRollup {
    if summaries.is_empty() {
        return CheckRollup {
            note: NOTE_NO_CHECKS.to_string(),
            state: HealthState::Unknown,
            stale_count: 0,
        };
    }

    let worst = summaries
        .iter()
        .map(|s| s.derived_state)
        .fold(HealthState::Healthy, pick_worse_state);
    let stale_count = summaries.iter().filter(|s| s.is_stale).count();

    let state = if stale_count > 0 {
        pick_worse_state(worst, HealthState::Stale)
    } else {
        worst
    };

    if stale_count > 0 && worst == HealthState::Healthy {
        let plural = if stale_count == 1 { "" } else { "s" };
        return CheckRollup {
            note: format!("{} check{} beyond freshness SLA.", stale_count, plural),
            state,
            stale_count,
        };
    }

    let note = most_severe(summaries)
        .and_then(|s| s.check.message.as_deref())
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| {
            if worst == HealthState::Healthy {
                NOTE_ALL_WITHIN_SLA.to_string()
            } else {
                NOTE_MONITORING.to_string()
            }
        });

    CheckRollup {
        note,
        state,
        stale_count,
    }
}

/// First check with the highest severity, i.e. the head of a stable
/// descending sort by rank.
fn most_severe(summaries: &[CheckSummary]) -> Option<&CheckSummary> {
    summaries.iter().fold(None, |focus: Option<&CheckSummary>, s| match focus {
        Some(f) if f.derived_state.rank() >= s.derived_state.rank() => Some(f),
        _ => Some(s),
    })
}
