use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::MovieEntry;

/// JSON envelope returned by the update endpoints and the scheduled trigger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateReport {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<MovieEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl UpdateReport {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            error: None,
            timestamp: None,
        }
    }

    pub fn failure(message: impl Into<String>, error: impl ToString) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            error: Some(error.to_string()),
            timestamp: None,
        }
    }

    pub fn with_data(mut self, data: Vec<MovieEntry>) -> Self {
        self.data = Some(data);
        self
    }

    pub fn stamped(mut self) -> Self {
        self.timestamp = Some(now_iso());
        self
    }
}

/// Current UTC time in the `2024-01-01T12:00:00.000Z` shape.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current UTC calendar day as `YYYY-MM-DD`.
pub fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}
