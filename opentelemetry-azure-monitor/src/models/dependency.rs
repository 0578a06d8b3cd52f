use serde::Serialize;
use std::collections::BTreeMap;

/// An outgoing call made by the application, or an in-process operation.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteDependencyData {
    pub ver: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_code: Option<String>,
    /// Command initiated by the call, e.g. the URL or SQL statement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub dependency_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    pub duration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub measurements: BTreeMap<String, f64>,
}

impl Default for RemoteDependencyData {
    fn default() -> Self {
        RemoteDependencyData {
            ver: 2,
            id: None,
            name: String::new(),
            result_code: None,
            data: None,
            dependency_type: None,
            target: None,
            duration: String::new(),
            success: None,
            properties: BTreeMap::new(),
            measurements: BTreeMap::new(),
        }
    }
}
