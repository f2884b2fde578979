use serde::{Deserialize, Deserializer, Serialize};

/// One scraped record describing a trending title.
///
/// Which fields are populated depends on the [`Source`](super::Source) that
/// produced the entry; unset fields are left out of the stored JSON.
/// `points` is nested: `Some(None)` is a score cell that held no number and is
/// written as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_original: Option<bool>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_or_null"
    )]
    pub points: Option<Option<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watchers: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl MovieEntry {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Two entries describe the same chart position when both the title and
    /// the watcher count match exactly.
    pub fn same_listing(&self, other: &MovieEntry) -> bool {
        self.title == other.title && self.watchers == other.watchers
    }
}

/// A key that is present maps to `Some`, even when its value is `null`.
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i64>::deserialize(deserializer).map(Some)
}
