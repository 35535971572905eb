//! Everything one page render needs, computed from a feed snapshot.

use crate::feed::Snapshot;
use crate::status::{
    build_dashboard_summary, build_platform_summaries, filter_published, messages_for_platform,
    select_banner_messages, summary_metrics, DashboardSummary, DataState, Headline,
    PlatformDirectory, PlatformSummary, ScopedMessage, StatusMessage, SummaryMetric,
};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Drilldown for the selected platform.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformDetail<'a> {
    pub summary: PlatformSummary,
    pub messages: Vec<&'a StatusMessage>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView<'a> {
    pub data_state: DataState,
    pub error: Option<&'a str>,
    pub headline: Headline,
    pub dashboard: DashboardSummary,
    pub metrics: Vec<SummaryMetric>,
    pub platforms: Vec<PlatformSummary>,
    pub messages: Vec<ScopedMessage<'a>>,
    pub published_count: usize,
    pub selected: Option<PlatformDetail<'a>>,
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl<'a> DashboardView<'a> {
    /// Run the engine over `snapshot`. Summaries are rebuilt on every call.
    ///
    /// A `selected_platform` that matches no platform is ignored.
    pub fn build(snapshot: &'a Snapshot, selected_platform: Option<&str>) -> Self {
        let collections = &snapshot.collections;

        let platforms = build_platform_summaries(
            &collections.platforms,
            &collections.checks,
            &collections.results,
        );
        let dashboard = build_dashboard_summary(
            &platforms,
            &collections.checks,
            &collections.results,
            snapshot.data_state,
        );

        let published = filter_published(&collections.messages);
        let directory = PlatformDirectory::from_platforms(&collections.platforms);

        let selected_summary = selected_platform
            .and_then(|id| platforms.iter().find(|s| s.platform.id == id));
        let selected_id = selected_summary.map(|s| s.platform.id.as_str());

        let messages = select_banner_messages(&published, selected_id, &directory);
        let selected = selected_summary.map(|summary| PlatformDetail {
            summary: summary.clone(),
            messages: messages_for_platform(&published, &summary.platform.id),
        });

        Self {
            data_state: snapshot.data_state,
            error: snapshot.error.as_deref(),
            headline: Headline::for_state(dashboard.state, snapshot.error.as_deref()),
            metrics: summary_metrics(&dashboard),
            dashboard,
            platforms,
            messages,
            published_count: published.len(),
            selected,
            refreshed_at: snapshot.refreshed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::Collections;
    use crate::status::{Platform, StatusCheck};

    fn snapshot() -> Snapshot {
        Snapshot {
            data_state: DataState::Ready,
            error: None,
            collections: Collections {
                platforms: vec![
                    Platform {
                        id: "p1".to_string(),
                        name: "Warehouse".to_string(),
                        ..Default::default()
                    },
                    Platform {
                        id: "p2".to_string(),
                        name: "Ingestion".to_string(),
                        ..Default::default()
                    },
                ],
                checks: vec![StatusCheck {
                    id: "c1".to_string(),
                    platform_id: "p1".to_string(),
                    name: "SQL".to_string(),
                    state: Some("red".to_string()),
                    message: Some("Warehouse offline".to_string()),
                    ..Default::default()
                }],
                results: vec![],
                messages: vec![
                    StatusMessage {
                        id: "m1".to_string(),
                        state: Some("published".to_string()),
                        title: "Maintenance".to_string(),
                        ..Default::default()
                    },
                    StatusMessage {
                        id: "m2".to_string(),
                        platform_id: Some("p1".to_string()),
                        state: Some("published".to_string()),
                        title: "Warehouse incident".to_string(),
                        ..Default::default()
                    },
                    StatusMessage {
                        id: "m3".to_string(),
                        state: Some("draft".to_string()),
                        title: "Draft".to_string(),
                        ..Default::default()
                    },
                ],
            },
            refreshed_at: None,
        }
    }

    #[test]
    fn test_build_without_selection() {
        let snapshot = snapshot();
        let view = DashboardView::build(&snapshot, None);

        assert_eq!(view.dashboard.state.as_str(), "critical");
        assert_eq!(view.headline.title, "Major incident");
        assert_eq!(view.platforms.len(), 2);
        assert_eq!(view.platforms[0].state.as_str(), "critical");
        assert_eq!(view.platforms[0].status_note, "Warehouse offline");
        assert_eq!(view.published_count, 2);
        assert_eq!(view.messages.len(), 1);
        assert!(view.selected.is_none());
    }

    #[test]
    fn test_build_with_selection() {
        let snapshot = snapshot();
        let view = DashboardView::build(&snapshot, Some("p1"));

        let detail = view.selected.as_ref().unwrap();
        assert_eq!(detail.summary.platform.name, "Warehouse");
        assert_eq!(detail.messages.len(), 1);
        let scopes: Vec<_> = view.messages.iter().map(|m| m.scope.as_str()).collect();
        assert_eq!(scopes, vec!["Global", "Warehouse"]);
    }

    #[test]
    fn test_unknown_selection_is_ignored() {
        let snapshot = snapshot();
        let view = DashboardView::build(&snapshot, Some("gone"));
        assert!(view.selected.is_none());
        assert_eq!(view.messages.len(), 1);
    }

    #[test]
    fn test_error_snapshot() {
        let snapshot = Snapshot {
            data_state: DataState::Error,
            error: Some("Boom".to_string()),
            ..Default::default()
        };
        let view = DashboardView::build(&snapshot, None);
        assert_eq!(view.dashboard.state.as_str(), "error");
        assert_eq!(view.headline.message, "Boom");
        assert!(view.metrics.is_empty());
    }
}
