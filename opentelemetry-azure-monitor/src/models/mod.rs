//! Azure Monitor wire model.
//!
//! Every item sent to the ingestion endpoint is an envelope
//! ([`TelemetryItem`]) carrying one domain payload ([`MonitorDomain`]).
mod dependency;
mod exception;
mod message;
mod metric;
mod request;

pub use dependency::RemoteDependencyData;
pub use exception::{TelemetryExceptionData, TelemetryExceptionDetails};
pub use message::{MessageData, SeverityLevel};
pub use metric::{MetricDataPoint, MetricsData};
pub use request::RequestData;

use crate::connection_string::ConnectionString;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Envelope around a single piece of telemetry.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryItem {
    pub ver: i32,
    pub name: String,
    pub time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<f32>,
    #[serde(rename = "iKey", skip_serializing_if = "Option::is_none")]
    pub instrumentation_key: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
    pub data: MonitorDomain,
    /// Connection string the item is routed with. Not part of the payload.
    #[serde(skip)]
    pub connection_string: Option<Arc<ConnectionString>>,
}

impl TelemetryItem {
    /// Looks up a context tag.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Looks up a custom property on the payload.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.data.properties().get(key).map(String::as_str)
    }
}

/// The payload of a [`TelemetryItem`], serialized as
/// `{"baseType": ..., "baseData": {...}}`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "baseType", content = "baseData")]
pub enum MonitorDomain {
    #[serde(rename = "RequestData")]
    Request(RequestData),
    #[serde(rename = "RemoteDependencyData")]
    RemoteDependency(RemoteDependencyData),
    #[serde(rename = "MessageData")]
    Message(MessageData),
    #[serde(rename = "ExceptionData")]
    Exception(TelemetryExceptionData),
    #[serde(rename = "MetricData")]
    Metric(MetricsData),
}

impl MonitorDomain {
    /// Envelope name for this payload kind.
    pub fn envelope_name(&self) -> &'static str {
        match self {
            MonitorDomain::Request(_) => "Request",
            MonitorDomain::RemoteDependency(_) => "RemoteDependency",
            MonitorDomain::Message(_) => "Message",
            MonitorDomain::Exception(_) => "Exception",
            MonitorDomain::Metric(_) => "Metric",
        }
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        match self {
            MonitorDomain::Request(data) => &data.properties,
            MonitorDomain::RemoteDependency(data) => &data.properties,
            MonitorDomain::Message(data) => &data.properties,
            MonitorDomain::Exception(data) => &data.properties,
            MonitorDomain::Metric(data) => &data.properties,
        }
    }

    pub(crate) fn attach(
        &mut self,
        properties: BTreeMap<String, String>,
        measurements: BTreeMap<String, f64>,
    ) {
        match self {
            MonitorDomain::Request(data) => {
                data.properties = properties;
                data.measurements = measurements;
            }
            MonitorDomain::RemoteDependency(data) => {
                data.properties = properties;
                data.measurements = measurements;
            }
            MonitorDomain::Message(data) => {
                data.properties = properties;
                data.measurements = measurements;
            }
            MonitorDomain::Exception(data) => {
                data.properties = properties;
                data.measurements = measurements;
            }
            // metric items have no measurements
            MonitorDomain::Metric(data) => data.properties = properties,
        }
    }
}

impl From<RequestData> for MonitorDomain {
    fn from(data: RequestData) -> Self {
        MonitorDomain::Request(data)
    }
}

impl From<RemoteDependencyData> for MonitorDomain {
    fn from(data: RemoteDependencyData) -> Self {
        MonitorDomain::RemoteDependency(data)
    }
}

impl From<MessageData> for MonitorDomain {
    fn from(data: MessageData) -> Self {
        MonitorDomain::Message(data)
    }
}

impl From<TelemetryExceptionData> for MonitorDomain {
    fn from(data: TelemetryExceptionData) -> Self {
        MonitorDomain::Exception(data)
    }
}

impl From<MetricsData> for MonitorDomain {
    fn from(data: MetricsData) -> Self {
        MonitorDomain::Metric(data)
    }
}

#[cfg(test)]
pub(crate) fn test_json_serialization<T: Serialize>(value: &T, desired: &str) {
    let result = serde_json::to_string(value).unwrap();
    assert_eq!(result, desired.to_owned());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_serialization() {
        let mut tags = BTreeMap::new();
        tags.insert("ai.operation.id".to_owned(), "abc".to_owned());
        let item = TelemetryItem {
            ver: 1,
            name: "Message".to_owned(),
            time: "2024-03-01T12:00:00.000000Z".to_owned(),
            sample_rate: Some(50.0),
            instrumentation_key: Some("ikey".to_owned()),
            tags,
            data: MessageData {
                message: "hello".to_owned(),
                ..Default::default()
            }
            .into(),
            connection_string: None,
        };
        test_json_serialization(
            &item,
            "{\"ver\":1,\"name\":\"Message\",\"time\":\"2024-03-01T12:00:00.000000Z\",\"sampleRate\":50.0,\"iKey\":\"ikey\",\"tags\":{\"ai.operation.id\":\"abc\"},\"data\":{\"baseType\":\"MessageData\",\"baseData\":{\"ver\":2,\"message\":\"hello\"}}}",
        );
    }

    #[test]
    fn envelope_names() {
        assert_eq!(
            MonitorDomain::from(RequestData::default()).envelope_name(),
            "Request"
        );
        assert_eq!(
            MonitorDomain::from(RemoteDependencyData::default()).envelope_name(),
            "RemoteDependency"
        );
        assert_eq!(
            MonitorDomain::from(TelemetryExceptionData::default()).envelope_name(),
            "Exception"
        );
        assert_eq!(
            MonitorDomain::from(MetricsData::default()).envelope_name(),
            "Metric"
        );
    }
}
