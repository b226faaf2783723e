use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domains::integrations::models::{Integration, IntegrationStatus};

/// Integrations the panel always lists, with their status before setup
pub const DEFAULT_INTEGRATIONS: &[(&str, IntegrationStatus)] = &[
    ("google_analytics", IntegrationStatus::Disconnected),
    ("google_search_console", IntegrationStatus::Disconnected),
    ("webhooks", IntegrationStatus::Inactive),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntegrationState {
    pub status: IntegrationStatus,
    pub config: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// `POST /integrations/{type}` and `POST /integrations/{type}/test`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntegrationConfigRequest {
    #[serde(default)]
    pub config: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntegrationTestResult {
    pub success: bool,
    pub message: String,
}

/// Stored rows win over the defaults; extra stored types are listed too.
pub fn merge_with_defaults(stored: Vec<Integration>) -> BTreeMap<String, IntegrationState> {
    let mut merged: BTreeMap<String, IntegrationState> = DEFAULT_INTEGRATIONS
        .iter()
        .map(|(kind, status)| {
            (
                kind.to_string(),
                IntegrationState {
                    status: *status,
                    config: json!({}),
                    updated_at: None,
                },
            )
        })
        .collect();

    for row in stored {
        merged.insert(
            row.kind,
            IntegrationState {
                status: row.status,
                config: row.config,
                updated_at: Some(row.updated_at),
            },
        );
    }
    merged
}

/// Integration type names are path segments: letters, digits, `_` and `-`.
pub fn is_valid_kind(kind: &str) -> bool {
    !kind.is_empty()
        && kind.len() <= 64
        && kind
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// True when the config carries at least one non-empty value
pub fn has_config(config: &Value) -> bool {
    match config {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => items.iter().any(has_config),
        Value::Object(map) => map.values().any(has_config),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

/// URL to probe when testing a webhook integration
pub fn webhook_target(config: &Value) -> Option<&str> {
    ["url", "webhook_url"]
        .iter()
        .find_map(|key| config.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|u| !u.is_empty())
}
