//! Global dashboard rollup.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::models::{StatusCheck, StatusResult};
use super::platforms::{latest_timestamp, PlatformSummary};
use super::staleness::is_stale;
use super::state::{pick_worse_state, DashboardState, HealthState};

/// Lifecycle of the fetched input collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataState {
    Loading,
    Error,
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub state: DashboardState,
    /// Platforms per state. Empty when the summary is gated or there is
    /// nothing to count.
    pub counts: BTreeMap<HealthState, usize>,
    pub platform_count: usize,
    pub stale_checks: usize,
    pub last_updated: Option<String>,
}

impl DashboardSummary {
    fn zeroed(state: DashboardState) -> Self {
        Self {
            state,
            counts: BTreeMap::new(),
            platform_count: 0,
            stale_checks: 0,
            last_updated: None,
        }
    }

    pub fn count(&self, state: HealthState) -> usize {
        self.counts.get(&state).copied().unwrap_or(0)
    }
}

/// Fold platform summaries and raw signals into the global summary.
///
/// `Loading` and `Error` short-circuit before any input is inspected.
pub fn build_dashboard_summary(
    platform_summaries: &[PlatformSummary],
    checks: &[StatusCheck],
    results: &[StatusResult],
    data_state: DataState,
) -> DashboardSummary {
    match data_state {
        DataState::Loading => return DashboardSummary::zeroed(DashboardState::Loading),
        DataState::Error => return DashboardSummary::zeroed(DashboardState::Error),
        DataState::Ready => {}
    }

    if platform_summaries.is_empty() {
        return DashboardSummary::zeroed(DashboardState::Empty);
    }

    let mut counts: BTreeMap<HealthState, usize> =
        HealthState::ALL.iter().map(|&s| (s, 0)).collect();
    let mut worst = HealthState::Healthy;

    for summary in platform_summaries {
        *counts.entry(summary.state).or_insert(0) += 1;
        worst = pick_worse_state(worst, summary.state);
    }

    let platforms_updated =
        latest_timestamp(platform_summaries.iter().map(|s| s.last_checked_at.as_deref()));
    let results_updated = latest_timestamp(results.iter().map(|r| r.created_at.as_deref()));
    let last_updated = latest_timestamp([platforms_updated, results_updated]).map(str::to_string);

    DashboardSummary {
        state: worst.into(),
        counts,
        platform_count: platform_summaries.len(),
        stale_checks: checks.iter().filter(|c| is_stale(c)).count(),
        last_updated,
    }
}

/// One headline number on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryMetric {
    pub label: &'static str,
    pub value: usize,
}

/// Headline numbers for a summary. None while loading or on error.
pub fn summary_metrics(summary: &DashboardSummary) -> Vec<SummaryMetric> {
    if summary.state.is_gated() {
        return Vec::new();
    }

    let attention = summary.count(HealthState::Degraded) + summary.count(HealthState::Critical);
    vec![
        SummaryMetric { label: "Healthy", value: summary.count(HealthState::Healthy) },
        SummaryMetric { label: "Attention", value: attention },
        SummaryMetric { label: "Stale signals", value: summary.stale_checks },
        SummaryMetric { label: "Unknown", value: summary.count(HealthState::Unknown) },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::models::{Minutes, Platform};
    use crate::status::platforms::build_platform_summaries;

    fn platform(id: &str) -> Platform {
        Platform {
            id: id.to_string(),
            name: id.to_uppercase(),
            ..Default::default()
        }
    }

    fn check(id: &str, platform_id: &str, state: &str) -> StatusCheck {
        StatusCheck {
            id: id.to_string(),
            platform_id: platform_id.to_string(),
            name: id.to_string(),
            state: Some(state.to_string()),
            ..Default::default()
        }
    }

    fn stale(mut check: StatusCheck) -> StatusCheck {
        check.freshness_minutes = Some(Minutes::from(45));
        check.sla_minutes = Some(Minutes::from(30));
        check
    }

    fn result(platform_id: &str, state: &str, created_at: &str) -> StatusResult {
        StatusResult {
            id: format!("r-{}", platform_id),
            platform_id: platform_id.to_string(),
            state: Some(state.to_string()),
            created_at: Some(created_at.to_string()),
        }
    }

    #[test]
    fn test_loading_gate_ignores_inputs() {
        let expected = DashboardSummary {
            state: DashboardState::Loading,
            counts: BTreeMap::new(),
            platform_count: 0,
            stale_checks: 0,
            last_updated: None,
        };
        assert_eq!(build_dashboard_summary(&[], &[], &[], DataState::Loading), expected);

        let summaries = build_platform_summaries(&[platform("p1")], &[], &[]);
        let checks = vec![stale(check("c1", "p1", "ok"))];
        let results = vec![result("p1", "down", "2024-01-01")];
        assert_eq!(
            build_dashboard_summary(&summaries, &checks, &results, DataState::Loading),
            expected
        );
    }

    #[test]
    fn test_error_gate() {
        let summaries = build_platform_summaries(&[platform("p1")], &[], &[]);
        let summary = build_dashboard_summary(&summaries, &[], &[], DataState::Error);
        assert_eq!(summary.state, DashboardState::Error);
        assert!(summary.counts.is_empty());
        assert_eq!(summary.platform_count, 0);
        assert_eq!(summary.last_updated, None);
    }

    #[test]
    fn test_empty_when_no_platforms() {
        let checks = vec![stale(check("c1", "orphan", "ok"))];
        let summary = build_dashboard_summary(&[], &checks, &[], DataState::Ready);
        assert_eq!(summary.state, DashboardState::Empty);
        assert_eq!(summary.stale_checks, 0);
        assert!(summary.counts.is_empty());
    }

    #[test]
    fn test_counts_and_worst_state() {
        let platforms = vec![platform("a"), platform("b"), platform("c"), platform("d")];
        let checks = vec![
            check("c1", "a", "ok"),
            check("c2", "b", "warning"),
            stale(check("c3", "c", "ok")),
            stale(check("c4", "orphan", "ok")),
        ];
        let summaries = build_platform_summaries(&platforms, &checks, &[]);
        let summary = build_dashboard_summary(&summaries, &checks, &[], DataState::Ready);

        assert_eq!(summary.state, DashboardState::Degraded);
        assert_eq!(summary.platform_count, 4);
        assert_eq!(summary.count(HealthState::Healthy), 1);
        assert_eq!(summary.count(HealthState::Degraded), 1);
        assert_eq!(summary.count(HealthState::Stale), 1);
        assert_eq!(summary.count(HealthState::Unknown), 1);
        assert_eq!(summary.count(HealthState::Critical), 0);
        assert_eq!(summary.counts.len(), 5);
        // Recounted from raw checks, including ones without a platform
        assert_eq!(summary.stale_checks, 2);
    }

    #[test]
    fn test_last_updated_includes_all_results() {
        let mut p = platform("a");
        p.updated_at = Some("2024-03-01T00:00:00Z".to_string());
        let summaries = build_platform_summaries(&[p], &[], &[]);

        let results = vec![result("other", "ok", "2024-03-02T00:00:00Z")];
        let summary = build_dashboard_summary(&summaries, &[], &results, DataState::Ready);
        assert_eq!(summary.last_updated.as_deref(), Some("2024-03-02T00:00:00Z"));

        let summary = build_dashboard_summary(&summaries, &[], &[], DataState::Ready);
        assert_eq!(summary.last_updated.as_deref(), Some("2024-03-01T00:00:00Z"));
    }

    #[test]
    fn test_counts_json_shape() {
        let summaries = build_platform_summaries(&[platform("a")], &[check("c1", "a", "green")], &[]);
        let summary = build_dashboard_summary(&summaries, &[], &[], DataState::Ready);
        let json = serde_json::to_string(&summary).unwrap();
        assert_eq!(
            json,
            r#"{"state":"healthy","counts":{"healthy":1,"degraded":0,"critical":0,"stale":0,"unknown":0},"platformCount":1,"staleChecks":0,"lastUpdated":null}"#
        );

        let gated = build_dashboard_summary(&[], &[], &[], DataState::Loading);
        let json = serde_json::to_value(&gated).unwrap();
        assert_eq!(json["counts"], serde_json::json!({}));
    }

    #[test]
    fn test_summary_metrics() {
        let platforms = vec![platform("a"), platform("b"), platform("c")];
        let checks = vec![check("c1", "a", "down"), check("c2", "b", "yellow"), check("c3", "c", "ok")];
        let summaries = build_platform_summaries(&platforms, &checks, &[]);
        let summary = build_dashboard_summary(&summaries, &checks, &[], DataState::Ready);

        let metrics = summary_metrics(&summary);
        assert_eq!(
            metrics,
            vec![
                SummaryMetric { label: "Healthy", value: 1 },
                SummaryMetric { label: "Attention", value: 2 },
                SummaryMetric { label: "Stale signals", value: 0 },
                SummaryMetric { label: "Unknown", value: 0 },
            ]
        );

        let loading = build_dashboard_summary(&[], &[], &[], DataState::Loading);
        assert!(summary_metrics(&loading).is_empty());

        let empty = build_dashboard_summary(&[], &[], &[], DataState::Ready);
        assert_eq!(summary_metrics(&empty).len(), 4);
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let platforms = vec![platform("a"), platform("b")];
        let checks = vec![check("c1", "a", "ok"), stale(check("c2", "b", "warning"))];
        let results = vec![result("b", "down", "2024-05-01")];

        let run = || {
            let summaries = build_platform_summaries(&platforms, &checks, &results);
            let dashboard = build_dashboard_summary(&summaries, &checks, &results, DataState::Ready);
            (
                serde_json::to_string(&summaries).unwrap(),
                serde_json::to_string(&dashboard).unwrap(),
            )
        };

        assert_eq!(run(), run());
    }
}
