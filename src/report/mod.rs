pub mod loader;
pub mod sanitize;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::report::sanitize::sanitize_value;

pub type ReportData = BTreeMap<String, Value>;

/// A single user-submitted settings record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub device: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub data: ReportData,
}

impl Report {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user: None,
            device: None,
            created_at: None,
            data: ReportData::new(),
        }
    }

    pub fn with_user(mut self, user: &str) -> Self {
        self.user = Some(user.to_string());
        self
    }

    pub fn with_device(mut self, device: &str) -> Self {
        self.device = Some(device.to_string());
        self
    }

    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }

    /// Sanitized string form of a data field; `""` when absent.
    pub fn field(&self, key: &str) -> String {
        field(&self.data, key)
    }

    /// Column heading used when rendering this report next to others.
    pub fn label(&self) -> String {
        let who = self
            .user
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(self.id.as_str());
        match self.device.as_deref().map(str::trim) {
            Some(device) if !device.is_empty() => format!("{who} ({device})"),
            _ => who.to_string(),
        }
    }
}

pub fn field(data: &ReportData, key: &str) -> String {
    data.get(key).map(sanitize_value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::Report;

    #[test]
    fn label_prefers_user_and_appends_device() {
        let report = Report::new("r1").with_user("alice").with_device("Steam Deck OLED");
        assert_eq!(report.label(), "alice (Steam Deck OLED)");

        let anonymous = Report::new("r2").with_user("  ");
        assert_eq!(anonymous.label(), "r2");
    }

    #[test]
    fn field_sanitizes_primitives() {
        let report = Report::new("r1")
            .with_field("game_resolution", " 1280x800 ")
            .with_field("frame_limit", json!(40))
            .with_field("missing", json!(null));
        assert_eq!(report.field("game_resolution"), "1280x800");
        assert_eq!(report.field("frame_limit"), "40");
        assert_eq!(report.field("missing"), "");
        assert_eq!(report.field("never_set"), "");
    }

    #[test]
    fn deserializes_with_missing_optional_fields() {
        let report: Report = serde_json::from_value(json!({
            "id": "abc",
            "data": { "vsync": "Off" }
        }))
        .expect("report should parse");
        assert_eq!(report.id, "abc");
        assert!(report.user.is_none());
        assert_eq!(report.field("vsync"), "Off");
    }
}
