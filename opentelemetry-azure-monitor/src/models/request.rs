use serde::Serialize;
use std::collections::BTreeMap;

/// An incoming request handled by the application.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestData {
    pub ver: i32,
    /// Span id of the request.
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Formatted as `[d.]hh:mm:ss.ffffff`.
    pub duration: String,
    pub success: bool,
    pub response_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub measurements: BTreeMap<String, f64>,
}

impl Default for RequestData {
    fn default() -> Self {
        RequestData {
            ver: 2,
            id: String::new(),
            name: None,
            duration: String::new(),
            success: true,
            response_code: "0".to_owned(),
            source: None,
            url: None,
            properties: BTreeMap::new(),
            measurements: BTreeMap::new(),
        }
    }
}
