use crate::connection_string::ConnectionString;
use crate::format::format_time;
use crate::models::{MonitorDomain, TelemetryItem};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::SystemTime;

/// Maximum length of a custom property value accepted by the ingestion service.
pub const MAX_PROPERTY_VALUE_LENGTH: usize = 8192;
/// Maximum length of a custom property or measurement key.
pub const MAX_PROPERTY_KEY_LENGTH: usize = 150;

/// Mutable state shared by every item kind while it is being mapped.
///
/// Mappers stamp tags, properties and measurements onto the builder, then
/// [`build`](TelemetryBuilder::build) moves them into the chosen payload.
#[derive(Clone, Debug, Default)]
pub struct TelemetryBuilder {
    time: Option<SystemTime>,
    sample_rate: Option<f32>,
    tags: BTreeMap<String, String>,
    properties: BTreeMap<String, String>,
    measurements: BTreeMap<String, f64>,
    connection_string: Option<Arc<ConnectionString>>,
}

impl TelemetryBuilder {
    pub fn new() -> Self {
        TelemetryBuilder::default()
    }

    /// Sets a context tag, replacing any previous value.
    pub fn add_tag(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.tags.insert(key.into(), value.into());
    }

    /// Sets a context tag only when it is not set yet.
    pub fn add_tag_if_absent(&mut self, key: &str, value: impl Into<String>) {
        if !self.tags.contains_key(key) {
            self.tags.insert(key.to_owned(), value.into());
        }
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Adds a custom property. Over-long keys and values are truncated.
    pub fn add_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = truncate(key.into(), MAX_PROPERTY_KEY_LENGTH);
        let value = truncate(value.into(), MAX_PROPERTY_VALUE_LENGTH);
        self.properties.insert(key, value);
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn add_measurement(&mut self, key: impl Into<String>, value: f64) {
        self.measurements
            .insert(truncate(key.into(), MAX_PROPERTY_KEY_LENGTH), value);
    }

    pub fn measurement(&self, key: &str) -> Option<f64> {
        self.measurements.get(key).copied()
    }

    pub fn set_time(&mut self, time: SystemTime) {
        self.time = Some(time);
    }

    /// Sets the sampling percentage, `100 / item count`.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = Some(sample_rate);
    }

    pub fn sample_rate(&self) -> Option<f32> {
        self.sample_rate
    }

    pub fn set_connection_string(&mut self, connection_string: Arc<ConnectionString>) {
        self.connection_string = Some(connection_string);
    }

    pub fn connection_string(&self) -> Option<&ConnectionString> {
        self.connection_string.as_deref()
    }

    /// Finishes the item with the given payload. Items built without a time
    /// are stamped with the current time.
    pub fn build(self, data: impl Into<MonitorDomain>) -> TelemetryItem {
        let mut data = data.into();
        data.attach(self.properties, self.measurements);
        TelemetryItem {
            ver: 1,
            name: data.envelope_name().to_owned(),
            time: format_time(self.time.unwrap_or_else(SystemTime::now)),
            sample_rate: self.sample_rate,
            instrumentation_key: self
                .connection_string
                .as_ref()
                .map(|cs| cs.instrumentation_key().to_owned()),
            tags: self.tags,
            data,
            connection_string: self.connection_string,
        }
    }
}

fn truncate(mut value: String, max_chars: usize) -> String {
    if let Some((index, _)) = value.char_indices().nth(max_chars) {
        value.truncate(index);
    }
    value
}
