//! Freshness SLA evaluation.

use super::models::{Minutes, StatusCheck};

/// Whether a check has gone longer without a signal than its SLA allows.
///
/// Unknown freshness is not staleness: a missing or non-numeric value on
/// either side yields `false`.
pub fn is_stale(check: &StatusCheck) -> bool {
    exceeds_sla(check.freshness_minutes.as_ref(), check.sla_minutes.as_ref())
}

fn exceeds_sla(freshness: Option<&Minutes>, sla: Option<&Minutes>) -> bool {
    match (freshness.and_then(Minutes::value), sla.and_then(Minutes::value)) {
        (Some(freshness), Some(sla)) => freshness > sla,
        _ => false,
    }
}
