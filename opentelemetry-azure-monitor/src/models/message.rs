use serde::Serialize;
use std::collections::BTreeMap;

/// Severity of a message or exception item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SeverityLevel {
    Verbose,
    Information,
    Warning,
    Error,
    Critical,
}

/// A trace message, produced from log records and span events.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageData {
    pub ver: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity_level: Option<SeverityLevel>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub measurements: BTreeMap<String, f64>,
}

impl Default for MessageData {
    fn default() -> Self {
        MessageData {
            ver: 2,
            message: String::new(),
            severity_level: None,
            properties: BTreeMap::new(),
            measurements: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_json_serialization;

    #[test]
    fn message_serialization() {
        let mut properties = BTreeMap::new();
        properties.insert("LoggerName".to_owned(), "app".to_owned());
        let message = MessageData {
            message: "cache miss".to_owned(),
            severity_level: Some(SeverityLevel::Warning),
            properties,
            ..Default::default()
        };
        test_json_serialization(
            &message,
            "{\"ver\":2,\"message\":\"cache miss\",\"severityLevel\":\"Warning\",\"properties\":{\"LoggerName\":\"app\"}}",
        );
    }
}
