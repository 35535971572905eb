//! Advisory message selection and scoping.

use serde::Serialize;
use std::collections::HashMap;

use super::models::{Platform, StatusMessage};

/// Most messages shown in the banner at once.
pub const BANNER_LIMIT: usize = 3;

pub const GLOBAL_SCOPE: &str = "Global";
const UNKNOWN_PLATFORM_SCOPE: &str = "Platform";

/// Messages whose publication state is exactly "published".
pub fn filter_published(messages: &[StatusMessage]) -> Vec<&StatusMessage> {
    messages
        .iter()
        .filter(|m| m.state.as_deref() == Some("published"))
        .collect()
}

/// Platform id to display name, built once per render.
#[derive(Debug, Clone, Default)]
pub struct PlatformDirectory {
    names: HashMap<String, String>,
}

impl PlatformDirectory {
    pub fn from_platforms(platforms: &[Platform]) -> Self {
        let names = platforms
            .iter()
            .map(|p| (p.id.clone(), p.name.clone()))
            .collect();
        Self { names }
    }

    pub fn name(&self, platform_id: &str) -> Option<&str> {
        self.names.get(platform_id).map(String::as_str)
    }

    /// "Global", the platform's name, or "Platform" for an unknown id.
    pub fn scope_for(&self, message: &StatusMessage) -> String {
        match message.platform_id.as_deref() {
            None => GLOBAL_SCOPE.to_string(),
            Some(id) => self.name(id).unwrap_or(UNKNOWN_PLATFORM_SCOPE).to_string(),
        }
    }
}

/// A message tagged with where it applies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScopedMessage<'a> {
    #[serde(flatten)]
    pub message: &'a StatusMessage,
    pub scope: String,
}

/// Pick the banner set: global messages first, then messages for the
/// selected platform, capped at [`BANNER_LIMIT`].
pub fn select_banner_messages<'a>(
    published: &[&'a StatusMessage],
    selected_platform: Option<&str>,
    directory: &PlatformDirectory,
) -> Vec<ScopedMessage<'a>> {
    let global = published.iter().filter(|m| m.platform_id.is_none());
    let scoped = published.iter().filter(|m| match selected_platform {
        Some(id) => m.platform_id.as_deref() == Some(id),
        None => false,
    });

    global
        .chain(scoped)
        .take(BANNER_LIMIT)
        .map(|&message| ScopedMessage {
            message,
            scope: directory.scope_for(message),
        })
        .collect()
}

/// Every published message for one platform, for the drilldown panel.
pub fn messages_for_platform<'a>(
    published: &[&'a StatusMessage],
    platform_id: &str,
) -> Vec<&'a StatusMessage> {
    published
        .iter()
        .copied()
        .filter(|m| m.platform_id.as_deref() == Some(platform_id))
        .collect()
}
