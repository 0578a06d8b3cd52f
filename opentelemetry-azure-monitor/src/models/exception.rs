use crate::models::SeverityLevel;
use serde::Serialize;
use std::collections::BTreeMap;
use typed_builder::TypedBuilder;

/// One or more exceptions, outermost first.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryExceptionData {
    pub ver: i32,
    pub exceptions: Vec<TelemetryExceptionDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity_level: Option<SeverityLevel>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub measurements: BTreeMap<String, f64>,
}

impl Default for TelemetryExceptionData {
    fn default() -> Self {
        TelemetryExceptionData {
            ver: 2,
            exceptions: Vec::new(),
            severity_level: None,
            properties: BTreeMap::new(),
            measurements: BTreeMap::new(),
        }
    }
}

#[derive(TypedBuilder, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryExceptionDetails {
    #[builder(setter(into))]
    pub type_name: String,
    #[builder(setter(into))]
    pub message: String,
    #[builder(setter(strip_option, into), default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_json_serialization;

    #[test]
    fn details_without_stack() {
        test_json_serialization(
            &TelemetryExceptionDetails::builder()
                .type_name("std::io::Error")
                .message("broken pipe")
                .build(),
            "{\"typeName\":\"std::io::Error\",\"message\":\"broken pipe\"}",
        );
    }

    #[test]
    fn exception_serialization() {
        let exception = TelemetryExceptionData {
            exceptions: vec![TelemetryExceptionDetails::builder()
                .type_name("ValueError")
                .message("bad value")
                .stack("ValueError: bad value\n  at main")
                .build()],
            severity_level: Some(SeverityLevel::Error),
            ..Default::default()
        };
        test_json_serialization(
            &exception,
            "{\"ver\":2,\"exceptions\":[{\"typeName\":\"ValueError\",\"message\":\"bad value\",\"stack\":\"ValueError: bad value\\n  at main\"}],\"severityLevel\":\"Error\"}",
        );
    }
}
