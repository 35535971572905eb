//! Per-platform summaries.

use serde::Serialize;
use std::collections::HashMap;

use super::checks::{summarize_check, summarize_checks, CheckSummary};
use super::models::{Platform, StatusCheck, StatusResult};
use super::state::{normalize_state, HealthState};

/// Everything the dashboard shows for one platform.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformSummary {
    pub platform: Platform,
    pub state: HealthState,
    pub status_note: String,
    pub last_checked_at: Option<String>,
    pub check_count: usize,
    pub stale_count: usize,
    /// Newest first by `checked_at`.
    pub checks: Vec<CheckSummary>,
    pub latest_result: Option<StatusResult>,
}

/// Build one summary per platform, in input order.
pub fn build_platform_summaries(
    platforms: &[Platform],
    checks: &[StatusCheck],
    results: &[StatusResult],
) -> Vec<PlatformSummary> {
    let checks_by_platform = group_by_platform(checks, |c| &c.platform_id);
    let results_by_platform = group_by_platform(results, |r| &r.platform_id);

    platforms
        .iter()
        .map(|platform| {
            let platform_checks = checks_by_platform
                .get(platform.id.as_str())
                .map(Vec::as_slice)
                .unwrap_or_default();
            let platform_results = results_by_platform
                .get(platform.id.as_str())
                .map(Vec::as_slice)
                .unwrap_or_default();

            summarize_platform(platform, platform_checks, platform_results)
        })
        .collect()
}

fn summarize_platform(
    platform: &Platform,
    checks: &[&StatusCheck],
    results: &[&StatusResult],
) -> PlatformSummary {
    let mut summaries: Vec<CheckSummary> = checks.iter().map(|c| summarize_check(c)).collect();
    summaries.sort_by(|a, b| {
        let a = a.check.checked_at.as_deref().unwrap_or_default();
        let b = b.check.checked_at.as_deref().unwrap_or_default();
        b.cmp(a)
    });

    let latest = latest_result(results);
    let rollup = summarize_checks(&summaries);

    let latest_check_at =
        latest_timestamp(summaries.iter().map(|s| s.check.checked_at.as_deref()));
    let last_checked_at = latest_timestamp([
        latest_check_at,
        latest.and_then(|r| r.created_at.as_deref()),
        platform.updated_at.as_deref(),
    ])
    .map(str::to_string);

    let state = match latest {
        Some(result) if summaries.is_empty() => normalize_state(result.state.as_deref()),
        _ => rollup.state,
    };

    PlatformSummary {
        platform: platform.clone(),
        state,
        status_note: rollup.note,
        last_checked_at,
        check_count: summaries.len(),
        stale_count: rollup.stale_count,
        checks: summaries,
        latest_result: latest.cloned(),
    }
}

fn group_by_platform<'a, T>(
    items: &'a [T],
    key: impl Fn(&'a T) -> &'a String,
) -> HashMap<&'a str, Vec<&'a T>> {
    let mut grouped: HashMap<&str, Vec<&T>> = HashMap::new();
    for item in items {
        grouped.entry(key(item).as_str()).or_default().push(item);
    }
    grouped
}

/// The result with the greatest `created_at`. The first one wins a tie and
/// results without a timestamp are skipped.
fn latest_result<'a>(results: &[&'a StatusResult]) -> Option<&'a StatusResult> {
    let mut latest: Option<&StatusResult> = None;
    for &result in results {
        let Some(created_at) = result.created_at.as_deref().filter(|t| !t.is_empty()) else {
            continue;
        };
        let newer = latest
            .and_then(|l| l.created_at.as_deref())
            .map_or(true, |current| created_at > current);
        if newer {
            latest = Some(result);
        }
    }
    latest
}

/// Lexical maximum of the present, non-empty timestamps.
pub fn latest_timestamp<'a, I>(values: I) -> Option<&'a str>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    values
        .into_iter()
        .flatten()
        .filter(|v| !v.is_empty())
        .fold(None, |latest, value| match latest {
            Some(current) if value <= current => Some(current),
            _ => Some(value),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::models::Minutes;

    fn platform(id: &str, updated_at: Option<&str>) -> Platform {
        Platform {
            id: id.to_string(),
            name: format!("Platform {}", id),
            owner: Some("ops".to_string()),
            updated_at: updated_at.map(str::to_string),
        }
    }

    fn check(id: &str, platform_id: &str, state: &str, checked_at: Option<&str>) -> StatusCheck {
        StatusCheck {
            id: id.to_string(),
            platform_id: platform_id.to_string(),
            name: id.to_string(),
            state: Some(state.to_string()),
            checked_at: checked_at.map(str::to_string),
            ..Default::default()
        }
    }

    fn result(id: &str, platform_id: &str, state: &str, created_at: Option<&str>) -> StatusResult {
        StatusResult {
            id: id.to_string(),
            platform_id: platform_id.to_string(),
            state: Some(state.to_string()),
            created_at: created_at.map(str::to_string),
        }
    }

    #[test]
    fn test_result_fallback_without_checks() {
        let platforms = vec![platform("p1", None)];
        let results = vec![result("r1", "p1", "critical", Some("2024-01-02"))];

        let summaries = build_platform_summaries(&platforms, &[], &results);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].state, HealthState::Critical);
        assert_eq!(summaries[0].status_note, "No checks reported yet.");
        assert_eq!(summaries[0].check_count, 0);
        assert_eq!(summaries[0].last_checked_at.as_deref(), Some("2024-01-02"));
    }

    #[test]
    fn test_checks_take_precedence_over_results() {
        let platforms = vec![platform("p1", None)];
        let checks = vec![check("c1", "p1", "ok", Some("2024-01-01T10:00:00Z"))];
        let results = vec![result("r1", "p1", "down", Some("2024-01-02"))];

        let summaries = build_platform_summaries(&platforms, &checks, &results);
        assert_eq!(summaries[0].state, HealthState::Healthy);
        assert_eq!(summaries[0].latest_result.as_ref().unwrap().id, "r1");
    }

    #[test]
    fn test_no_checks_no_results_is_unknown() {
        let summaries = build_platform_summaries(&[platform("p1", None)], &[], &[]);
        assert_eq!(summaries[0].state, HealthState::Unknown);
        assert_eq!(summaries[0].last_checked_at, None);
        assert!(summaries[0].latest_result.is_none());
    }

    #[test]
    fn test_preserves_platform_order_and_filters_by_platform() {
        let platforms = vec![platform("b", None), platform("a", None)];
        let checks = vec![
            check("c1", "a", "down", None),
            check("c2", "b", "ok", None),
            check("c3", "zzz", "down", None),
        ];

        let summaries = build_platform_summaries(&platforms, &checks, &[]);
        let ids: Vec<_> = summaries.iter().map(|s| s.platform.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(summaries[0].state, HealthState::Healthy);
        assert_eq!(summaries[1].state, HealthState::Critical);
        assert_eq!(summaries[1].check_count, 1);
    }

    #[test]
    fn test_checks_sorted_newest_first() {
        let checks = vec![
            check("old", "p1", "ok", Some("2024-01-01T08:00:00Z")),
            check("missing", "p1", "ok", None),
            check("new", "p1", "ok", Some("2024-01-01T09:00:00Z")),
        ];
        let summaries = build_platform_summaries(&[platform("p1", None)], &checks, &[]);
        let order: Vec<_> = summaries[0].checks.iter().map(|c| c.check.id.as_str()).collect();
        assert_eq!(order, vec!["new", "old", "missing"]);
    }

    #[test]
    fn test_latest_result_first_max_wins() {
        let results = vec![
            result("r1", "p1", "ok", Some("2024-01-02")),
            result("r2", "p1", "down", Some("2024-01-03")),
            result("r3", "p1", "warning", Some("2024-01-03")),
            result("r4", "p1", "warning", None),
        ];
        let summaries = build_platform_summaries(&[platform("p1", None)], &[], &results);
        let latest = summaries[0].latest_result.as_ref().unwrap();
        assert_eq!(latest.id, "r2");
        assert_eq!(summaries[0].state, HealthState::Critical);
    }

    #[test]
    fn test_last_checked_at_takes_max_of_sources() {
        let checks = vec![check("c1", "p1", "ok", Some("2024-01-01T09:00:00Z"))];
        let results = vec![result("r1", "p1", "ok", Some("2024-01-01T08:00:00Z"))];

        let summaries =
            build_platform_summaries(&[platform("p1", Some("2024-01-05T00:00:00Z"))], &checks, &results);
        assert_eq!(summaries[0].last_checked_at.as_deref(), Some("2024-01-05T00:00:00Z"));

        let summaries =
            build_platform_summaries(&[platform("p1", Some("2023-12-31T00:00:00Z"))], &checks, &results);
        assert_eq!(summaries[0].last_checked_at.as_deref(), Some("2024-01-01T09:00:00Z"));
    }

    #[test]
    fn test_stale_counts_flow_through() {
        let mut late = check("c1", "p1", "ok", Some("2024-01-01"));
        late.freshness_minutes = Some(Minutes::from(90));
        late.sla_minutes = Some(Minutes::Text("60".to_string()));

        let summaries = build_platform_summaries(&[platform("p1", None)], &[late], &[]);
        assert_eq!(summaries[0].stale_count, 1);
        assert_eq!(summaries[0].state, HealthState::Stale);
        assert!(summaries[0].checks[0].is_stale);
    }

    #[test]
    fn test_latest_timestamp() {
        assert_eq!(latest_timestamp([None, None]), None);
        assert_eq!(latest_timestamp([Some(""), None]), None);
        assert_eq!(latest_timestamp([Some("2024-01-01"), Some("2024-02-01"), None]), Some("2024-02-01"));
    }
}
