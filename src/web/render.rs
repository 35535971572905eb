//! Server-side HTML rendering of the dashboard.

use super::view::{DashboardView, PlatformDetail};
use crate::status::{
    format_date_range, format_timestamp, CheckSummary, DataState, PlatformSummary, ScopedMessage,
    StatusMessage,
};

const DASHBOARD_TEMPLATE: &str = include_str!("templates/dashboard.html");
const LAYOUT_TEMPLATE: &str = include_str!("templates/layout.html");

const PLACEHOLDER_TILES: usize = 3;
const FALLBACK_METRIC_LABELS: [&str; 4] = ["Healthy", "Attention", "Stale signals", "Unknown"];

/// Render the full dashboard page.
pub fn render_dashboard(view: &DashboardView<'_>) -> String {
    let state = view.dashboard.state;
    let loading = view.data_state == DataState::Loading;

    let error_banner = match view.error {
        Some(error) => format!(r#"<div class="status-error">{}</div>"#, escape_html(error)),
        None => String::new(),
    };

    let platform_count = view.dashboard.platform_count.to_string();
    let tile_count = view.platforms.len().to_string();
    let published_count = view.published_count.to_string();
    let last_updated = format_timestamp(view.dashboard.last_updated.as_deref());
    let state_badge = badge(state.as_str(), state.label(), "md");
    let headline_badge = badge(state.as_str(), view.headline.label, "md");

    let content = fill_template(
        DASHBOARD_TEMPLATE,
        &[
            ("state", state.as_str()),
            ("state_badge", state_badge.as_str()),
            ("error_banner", error_banner.as_str()),
            ("headline_title", escape_html(view.headline.title).as_str()),
            ("headline_message", escape_html(&view.headline.message).as_str()),
            ("headline_badge", headline_badge.as_str()),
            ("platform_count", platform_count.as_str()),
            ("last_updated", escape_html(&last_updated).as_str()),
            ("metrics", render_metrics(view, loading).as_str()),
            ("tile_count", tile_count.as_str()),
            ("published_count", published_count.as_str()),
            ("messages", render_messages(&view.messages, loading).as_str()),
            ("platform_tiles", render_tiles(view, loading).as_str()),
            ("detail", render_detail(view.selected.as_ref()).as_str()),
        ],
    );

    fill_template(
        LAYOUT_TEMPLATE,
        &[("title", "Platform status"), ("content", content.as_str())],
    )
}

fn render_metrics(view: &DashboardView<'_>, loading: bool) -> String {
    if !view.metrics.is_empty() {
        return view
            .metrics
            .iter()
            .map(|m| metric(m.label, &m.value.to_string()))
            .collect();
    }

    if loading {
        return r#"<div class="status-metric skeleton" aria-hidden="true"></div>"#.repeat(4);
    }

    FALLBACK_METRIC_LABELS.iter().map(|label| metric(label, "-")).collect()
}

fn metric(label: &str, value: &str) -> String {
    format!(
        r#"<div class="status-metric"><p class="meta-title">{}</p><p class="meta-value">{}</p></div>"#,
        escape_html(label),
        escape_html(value)
    )
}

fn render_messages(messages: &[ScopedMessage<'_>], loading: bool) -> String {
    if loading {
        return r#"<div class="status-message skeleton"></div>"#.repeat(PLACEHOLDER_TILES);
    }
    if messages.is_empty() {
        return r#"<div class="status-empty">No active status messages.</div>"#.to_string();
    }

    messages
        .iter()
        .map(|scoped| {
            let message = scoped.message;
            let severity = message.severity.as_deref().unwrap_or("info");
            let window = format_date_range(message.start_at.as_deref(), message.end_at.as_deref())
                .map(|w| format!(r#"<p class="status-message-window">{}</p>"#, escape_html(&w)))
                .unwrap_or_default();

            format!(
                r#"<article class="status-message {severity}">
    <div class="status-message-header">
        <span class="status-message-eyebrow">{eyebrow}</span>
        <span class="status-message-scope">{scope}</span>
    </div>
    <h3>{title}</h3>
    <p>{body}</p>
    {window}
</article>"#,
                severity = escape_html(severity),
                eyebrow = escape_html(&severity.to_uppercase()),
                scope = escape_html(&scoped.scope),
                title = escape_html(&message.title),
                body = escape_html(&message.body_md),
                window = window,
            )
        })
        .collect()
}

fn render_tiles(view: &DashboardView<'_>, loading: bool) -> String {
    if loading {
        return r#"<div class="platform-tile skeleton"></div>"#.repeat(PLACEHOLDER_TILES);
    }
    if view.platforms.is_empty() {
        return r#"<div class="status-empty">No platforms have reported status signals yet.</div>"#
            .to_string();
    }

    let selected_id = view.selected.as_ref().map(|d| d.summary.platform.id.as_str());
    view.platforms
        .iter()
        .map(|summary| tile(summary, selected_id == Some(summary.platform.id.as_str())))
        .collect()
}

fn tile(summary: &PlatformSummary, selected: bool) -> String {
    let platform = &summary.platform;

    format!(
        r#"<article class="platform-tile{selected}" data-selected="{selected_flag}">
    <div class="platform-tile-header">
        <div>
            <p class="platform-eyebrow">{owner}</p>
            <h3>{name}</h3>
        </div>
        {badge}
    </div>
    <p class="platform-note">{note}</p>
    <div class="platform-meta">
        <div><p class="meta-title">Checks</p><p class="meta-value">{checks}</p></div>
        <div><p class="meta-title">Stale</p><p class="meta-value">{stale}</p></div>
        <div><p class="meta-title">Last check</p><p class="meta-value">{last_check}</p></div>
    </div>
    <a class="platform-action" href="/?platform={link}">View checks</a>
</article>"#,
        selected = if selected { " selected" } else { "" },
        selected_flag = selected,
        owner = escape_html(platform.owner.as_deref().unwrap_or("Platform owner")),
        name = escape_html(if platform.name.is_empty() { "Platform" } else { &platform.name }),
        badge = badge(summary.state.as_str(), summary.state.label(), "sm"),
        note = escape_html(&summary.status_note),
        checks = summary.check_count,
        stale = summary.stale_count,
        last_check = escape_html(&format_timestamp(summary.last_checked_at.as_deref())),
        link = escape_html(&encode_query_value(&platform.id)),
    )
}

fn render_detail(detail: Option<&PlatformDetail<'_>>) -> String {
    let Some(detail) = detail else {
        return r#"<section class="platform-detail empty">
    <h3>Platform drilldown</h3>
    <p class="page-subtitle">Select a platform tile to review checks, freshness, and status messages.</p>
</section>"#
            .to_string();
    };

    let summary = &detail.summary;
    let checks = if summary.checks.is_empty() {
        r#"<p class="page-subtitle">No checks have been reported for this platform.</p>"#.to_string()
    } else {
        let items: String = summary.checks.iter().map(check_item).collect();
        format!(r#"<ul class="platform-checks">{}</ul>"#, items)
    };
    let messages = if detail.messages.is_empty() {
        r#"<p class="page-subtitle">No active messages for this platform.</p>"#.to_string()
    } else {
        let items: String = detail.messages.iter().map(|m| message_item(m)).collect();
        format!(r#"<ul class="platform-messages">{}</ul>"#, items)
    };

    format!(
        r#"<section class="platform-detail">
    <div class="platform-detail-header">
        <div>
            <p class="platform-eyebrow">{owner}</p>
            <h3>{name}</h3>
            <p class="page-subtitle">{note}</p>
        </div>
        {badge}
    </div>
    <div class="platform-detail-grid">
        <div><h4>Latest checks</h4>{checks}</div>
        <div><h4>Messages</h4>{messages}</div>
    </div>
</section>"#,
        owner = escape_html(summary.platform.owner.as_deref().unwrap_or_default()),
        name = escape_html(&summary.platform.name),
        note = escape_html(&summary.status_note),
        badge = badge(summary.state.as_str(), summary.state.label(), "md"),
        checks = checks,
        messages = messages,
    )
}

fn check_item(summary: &CheckSummary) -> String {
    let check = &summary.check;
    let minutes = |m: Option<&crate::status::Minutes>| match m.and_then(|m| m.value()) {
        Some(v) => format!("{}", v),
        None => "-".to_string(),
    };

    format!(
        r#"<li class="platform-check">
    <div>
        <strong>{name}</strong>
        <p class="page-subtitle">{message}</p>
    </div>
    <div class="platform-check-meta">
        {badge}
        <span>{checked_at}</span>
        <span>Freshness {freshness}m / SLA {sla}m</span>
    </div>
</li>"#,
        name = escape_html(&check.name),
        message = escape_html(
            check
                .message
                .as_deref()
                .filter(|m| !m.is_empty())
                .unwrap_or("No additional context.")
        ),
        badge = badge(summary.derived_state.as_str(), summary.derived_state.label(), "sm"),
        checked_at = escape_html(&format_timestamp(check.checked_at.as_deref())),
        freshness = minutes(check.freshness_minutes.as_ref()),
        sla = minutes(check.sla_minutes.as_ref()),
    )
}

fn message_item(message: &StatusMessage) -> String {
    format!(
        r#"<li class="platform-message {severity}"><strong>{title}</strong><p>{body}</p><span>{created}</span></li>"#,
        severity = escape_html(message.severity.as_deref().unwrap_or("info")),
        title = escape_html(&message.title),
        body = escape_html(&message.body_md),
        created = escape_html(&format_timestamp(message.created_at.as_deref())),
    )
}

fn badge(state: &str, label: &str, size: &str) -> String {
    format!(
        r#"<span class="status-badge {} {}"><span class="status-dot"></span>{}</span>"#,
        state,
        size,
        escape_html(label)
    )
}

/// Substitute `{{key}}` placeholders in a single pass, so substituted text
/// is never itself scanned for placeholders. Unknown keys render empty.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = &after[..end];
                if let Some((_, value)) = values.iter().find(|(k, _)| *k == key) {
                    out.push_str(value);
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn encode_query_value(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => out.push(b as char),
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}
