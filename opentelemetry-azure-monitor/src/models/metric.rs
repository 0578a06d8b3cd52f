use serde::Serialize;
use std::collections::BTreeMap;
use typed_builder::TypedBuilder;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsData {
    pub ver: i32,
    pub metrics: Vec<MetricDataPoint>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

impl Default for MetricsData {
    fn default() -> Self {
        MetricsData {
            ver: 2,
            metrics: Vec::new(),
            properties: BTreeMap::new(),
        }
    }
}

/// A single aggregated value. Histograms carry their count and extremes.
#[derive(TypedBuilder, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricDataPoint {
    #[builder(setter(into))]
    pub name: String,
    pub value: f64,
    #[builder(setter(strip_option), default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i32>,
    #[builder(setter(strip_option), default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[builder(setter(strip_option), default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[builder(setter(strip_option), default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std_dev: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_json_serialization;

    #[test]
    fn gauge_point_serialization() {
        test_json_serialization(
            &MetricDataPoint::builder().name("queue.depth").value(3.0).build(),
            "{\"name\":\"queue.depth\",\"value\":3.0}",
        );
    }

    #[test]
    fn histogram_point_serialization() {
        let data = MetricsData {
            metrics: vec![MetricDataPoint::builder()
                .name("latency")
                .value(12.5)
                .count(4)
                .min(1.0)
                .max(7.5)
                .build()],
            ..Default::default()
        };
        test_json_serialization(
            &data,
            "{\"ver\":2,\"metrics\":[{\"name\":\"latency\",\"value\":12.5,\"count\":4,\"min\":1.0,\"max\":7.5}]}",
        );
    }
}
