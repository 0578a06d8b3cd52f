//! Maps metric data points to metric items.
//!
//! Every gauge, sum and histogram point becomes one custom metric item. HTTP
//! and RPC duration histograms are additionally reported as pre-aggregated
//! standard metrics with the fixed dimension set the portal's request and
//! dependency charts use.
use crate::attributes::Attributes;
use crate::builder::TelemetryBuilder;
use crate::config::ExporterConfig;
use crate::context_tags;
use crate::default_ports;
use crate::error::MappingError;
use crate::log_once::WarnOnce;
use crate::mappings::Mappings;
use crate::models::{MetricDataPoint, MetricsData, TelemetryItem};
use crate::resource::TelemetryInitializer;
use crate::semconv;
use crate::span_mapper::target_or_none;
use opentelemetry_sdk::metrics::data::{AggregatedMetrics, Metric, MetricData, ResourceMetrics};
use opentelemetry_sdk::Resource;
use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

const MS_METRIC_ID: &str = "_MS.MetricId";
const MS_IS_AUTOCOLLECTED: &str = "_MS.IsAutocollected";
const REQUESTS_DURATION: &str = "requests/duration";
const DEPENDENCIES_DURATION: &str = "dependencies/duration";
const REQUEST_RESULT_CODE: &str = "request/resultCode";
const REQUEST_SUCCESS: &str = "request/success";
const DEPENDENCY_TYPE: &str = "dependency/type";
const DEPENDENCY_TARGET: &str = "dependency/target";
const DEPENDENCY_RESULT_CODE: &str = "dependency/resultCode";
const DEPENDENCY_SUCCESS: &str = "dependency/success";
const OPERATION_SYNTHETIC: &str = "operation/synthetic";
const CLOUD_ROLE_NAME: &str = "cloud/roleName";
const CLOUD_ROLE_INSTANCE: &str = "cloud/roleInstance";

const MILLIS_PER_SECOND: f64 = 1000.0;

/// Instrumentation scopes whose RPC duration histograms only feed the
/// standard metrics.
const OTEL_SCOPE_PREFIX: &str = "io.opentelemetry";

/// Converts the numeric types the SDK aggregates into the wire's `f64`.
pub trait AsF64: Copy {
    fn as_f64(self) -> f64;
}

impl AsF64 for f64 {
    fn as_f64(self) -> f64 {
        self
    }
}

impl AsF64 for u64 {
    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl AsF64 for i64 {
    fn as_f64(self) -> f64 {
        self as f64
    }
}

/// The aggregated value of one point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointValue {
    Scalar(f64),
    Histogram {
        count: u64,
        sum: f64,
        min: Option<f64>,
        max: Option<f64>,
    },
}

/// One data point of a named metric, independent of its numeric type.
#[derive(Clone, Debug)]
pub struct MetricPoint<'a> {
    /// Name of the instrumentation scope that recorded the metric.
    pub scope: &'a str,
    pub name: &'a str,
    pub time: SystemTime,
    pub attributes: Attributes<'a>,
    pub value: PointValue,
}

/// Which standard metric a duration instrument feeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StandardMetric {
    Requests,
    Dependencies,
}

impl StandardMetric {
    fn of(name: &str) -> Option<Self> {
        match name {
            "http.server.request.duration" | "http.server.duration" | "rpc.server.duration" => {
                Some(StandardMetric::Requests)
            }
            "http.client.request.duration" | "http.client.duration" | "rpc.client.duration" => {
                Some(StandardMetric::Dependencies)
            }
            _ => None,
        }
    }

    /// Unstable RPC instruments from OpenTelemetry's own instrumentation are
    /// not duplicated as custom metrics.
    fn also_custom(name: &str, scope: &str) -> bool {
        !(matches!(name, "rpc.server.duration" | "rpc.client.duration")
            && scope.starts_with(OTEL_SCOPE_PREFIX))
    }
}

pub struct MetricDataMapper {
    capture_http_server_4xx_as_error: bool,
    initializer: TelemetryInitializer,
    mappings: Mappings,
}

impl fmt::Debug for MetricDataMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetricDataMapper")
            .field(
                "capture_http_server_4xx_as_error",
                &self.capture_http_server_4xx_as_error,
            )
            .field("mappings", &self.mappings)
            .finish_non_exhaustive()
    }
}

impl MetricDataMapper {
    pub fn new(capture_http_server_4xx_as_error: bool, initializer: TelemetryInitializer) -> Self {
        MetricDataMapper {
            capture_http_server_4xx_as_error,
            initializer,
            mappings: Mappings::builder()
                .common(Arc::new(WarnOnce::new()))
                .build(),
        }
    }

    pub fn from_config(config: &ExporterConfig) -> Self {
        MetricDataMapper::new(
            config.capture_http_server_4xx_as_error(),
            config.telemetry_initializer(),
        )
    }

    /// Maps every point of every metric. Fails on the first metric whose
    /// aggregation has no item representation.
    pub fn map(&self, metrics: &ResourceMetrics) -> Result<Vec<TelemetryItem>, MappingError> {
        let resource = metrics.resource();
        let mut items = Vec::new();
        for scope_metrics in metrics.scope_metrics() {
            for metric in scope_metrics.metrics() {
                for point in points(scope_metrics.scope().name(), metric)? {
                    items.extend(self.map_point(&point, resource)?);
                }
            }
        }
        Ok(items)
    }

    /// Maps one point to its custom metric item, preceded by the standard
    /// metric item when the instrument feeds one.
    pub fn map_point(
        &self,
        point: &MetricPoint<'_>,
        resource: &Resource,
    ) -> Result<Vec<TelemetryItem>, MappingError> {
        let mut items = Vec::with_capacity(2);
        match StandardMetric::of(point.name) {
            Some(kind) => {
                items.push(self.standard_item(point, kind, resource));
                if StandardMetric::also_custom(point.name, point.scope) {
                    items.push(self.custom_item(point, resource)?);
                }
            }
            None => items.push(self.custom_item(point, resource)?),
        }
        Ok(items)
    }

    fn custom_item(
        &self,
        point: &MetricPoint<'_>,
        resource: &Resource,
    ) -> Result<TelemetryItem, MappingError> {
        let mut builder = self.builder(point, resource);
        self.mappings.map(&point.attributes, &mut builder)?;
        Ok(builder.build(metrics_data(point, 1.0)))
    }

    fn standard_item(
        &self,
        point: &MetricPoint<'_>,
        kind: StandardMetric,
        resource: &Resource,
    ) -> TelemetryItem {
        let mut builder = self.builder(point, resource);
        self.apply_standard_dimensions(&mut builder, kind, &point.attributes);
        // stable HTTP duration instruments record seconds, the charts expect milliseconds
        let scale = if point.name.ends_with(".request.duration") {
            MILLIS_PER_SECOND
        } else {
            1.0
        };
        builder.build(metrics_data(point, scale))
    }

    fn builder(&self, point: &MetricPoint<'_>, resource: &Resource) -> TelemetryBuilder {
        let mut builder = TelemetryBuilder::new();
        (self.initializer)(&mut builder, resource);
        builder.set_time(point.time);
        builder
    }

    fn apply_standard_dimensions(
        &self,
        builder: &mut TelemetryBuilder,
        kind: StandardMetric,
        attributes: &Attributes<'_>,
    ) {
        builder.add_property(MS_IS_AUTOCOLLECTED, "True");
        let http_status = attributes.get_i64_either(
            semconv::HTTP_RESPONSE_STATUS_CODE,
            semconv::HTTP_STATUS_CODE,
        );
        let grpc_status = attributes.get_i64(semconv::RPC_GRPC_STATUS_CODE);
        let result_code = http_status
            .or(grpc_status)
            .map_or_else(|| "0".to_owned(), |code| code.to_string());

        match kind {
            StandardMetric::Requests => {
                let threshold = if self.capture_http_server_4xx_as_error {
                    400
                } else {
                    500
                };
                builder.add_property(MS_METRIC_ID, REQUESTS_DURATION);
                builder.add_property(REQUEST_RESULT_CODE, result_code);
                builder.add_property(
                    REQUEST_SUCCESS,
                    bool_dimension(is_success(http_status, grpc_status, threshold)),
                );
            }
            StandardMetric::Dependencies => {
                let dependency_type = if attributes
                    .get_str_either(semconv::HTTP_REQUEST_METHOD, semconv::HTTP_METHOD)
                    .is_some()
                    || http_status.is_some()
                {
                    "Http"
                } else {
                    attributes.get_str(semconv::RPC_SYSTEM).unwrap_or("InProc")
                };
                let default_port = default_ports::for_http_scheme(
                    attributes.get_str_either(semconv::URL_SCHEME, semconv::HTTP_SCHEME),
                );
                builder.add_property(MS_METRIC_ID, DEPENDENCIES_DURATION);
                builder.add_property(DEPENDENCY_TYPE, dependency_type);
                if let Some(target) = target_or_none(attributes, default_port) {
                    builder.add_property(DEPENDENCY_TARGET, target);
                }
                builder.add_property(DEPENDENCY_RESULT_CODE, result_code);
                builder.add_property(
                    DEPENDENCY_SUCCESS,
                    bool_dimension(is_success(http_status, grpc_status, 400)),
                );
            }
        }

        let synthetic = attributes.get_bool(semconv::IS_SYNTHETIC) == Some(true);
        builder.add_property(OPERATION_SYNTHETIC, bool_dimension(synthetic));
        if let Some(role) = builder.tag(context_tags::AI_CLOUD_ROLE).map(str::to_owned) {
            builder.add_property(CLOUD_ROLE_NAME, role);
        }
        if let Some(instance) = builder
            .tag(context_tags::AI_CLOUD_ROLE_INSTANCE)
            .map(str::to_owned)
        {
            builder.add_property(CLOUD_ROLE_INSTANCE, instance);
        }
    }
}

fn metrics_data(point: &MetricPoint<'_>, scale: f64) -> MetricsData {
    let name = point
        .attributes
        .get_str(semconv::METRIC_NAME)
        .unwrap_or(point.name);
    let data_point = match point.value {
        PointValue::Scalar(value) => MetricDataPoint::builder()
            .name(name)
            .value(value * scale)
            .build(),
        PointValue::Histogram {
            count,
            sum,
            min,
            max,
        } => MetricDataPoint {
            count: i32::try_from(count).ok(),
            min: min.map(|min| min * scale),
            max: max.map(|max| max * scale),
            ..MetricDataPoint::builder()
                .name(name)
                .value(sum * scale)
                .build()
        },
    };
    MetricsData {
        metrics: vec![data_point],
        ..Default::default()
    }
}

fn is_success(http_status: Option<i64>, grpc_status: Option<i64>, threshold: i64) -> bool {
    match (http_status, grpc_status) {
        (Some(code), _) => code < threshold,
        (None, Some(code)) => code == 0,
        (None, None) => true,
    }
}

fn bool_dimension(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// Flattens a metric into points. Exponential histograms are rejected.
pub fn points<'a>(
    scope: &'a str,
    metric: &'a Metric,
) -> Result<Vec<MetricPoint<'a>>, MappingError> {
    match metric.data() {
        AggregatedMetrics::F64(data) => points_of(scope, metric.name(), data),
        AggregatedMetrics::U64(data) => points_of(scope, metric.name(), data),
        AggregatedMetrics::I64(data) => points_of(scope, metric.name(), data),
        #[allow(unreachable_patterns)]
        _ => Err(MappingError::UnsupportedMetricType("unknown number type")),
    }
}

fn points_of<'a, T: AsF64>(
    scope: &'a str,
    name: &'a str,
    data: &'a MetricData<T>,
) -> Result<Vec<MetricPoint<'a>>, MappingError> {
    match data {
        MetricData::Gauge(gauge) => Ok(gauge
            .data_points()
            .map(|point| MetricPoint {
                scope,
                name,
                time: gauge.time(),
                attributes: Attributes::from_key_values(point.attributes()),
                value: PointValue::Scalar(point.value().as_f64()),
            })
            .collect()),
        MetricData::Sum(sum) => Ok(sum
            .data_points()
            .map(|point| MetricPoint {
                scope,
                name,
                time: sum.time(),
                attributes: Attributes::from_key_values(point.attributes()),
                value: PointValue::Scalar(point.value().as_f64()),
            })
            .collect()),
        MetricData::Histogram(histogram) => Ok(histogram
            .data_points()
            .map(|point| MetricPoint {
                scope,
                name,
                time: histogram.time(),
                attributes: Attributes::from_key_values(point.attributes()),
                value: PointValue::Histogram {
                    count: point.count(),
                    sum: point.sum().as_f64(),
                    min: point.min().map(AsF64::as_f64),
                    max: point.max().map(AsF64::as_f64),
                },
            })
            .collect()),
        MetricData::ExponentialHistogram(_) => Err(MappingError::UnsupportedMetricType(
            "exponential histogram",
        )),
        #[allow(unreachable_patterns)]
        _ => Err(MappingError::UnsupportedMetricType("unknown aggregation")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MonitorDomain;
    use crate::resource::resource_initializer;
    use opentelemetry::metrics::MeterProvider;
    use opentelemetry::KeyValue;
    use opentelemetry_sdk::metrics::{InMemoryMetricExporter, PeriodicReader, SdkMeterProvider};
    use std::time::Duration;

    fn mapper() -> MetricDataMapper {
        MetricDataMapper::new(true, resource_initializer(None, None))
    }

    fn resource() -> Resource {
        Resource::builder_empty()
            .with_attributes([
                KeyValue::new("service.name", "checkout"),
                KeyValue::new("service.instance.id", "checkout-1"),
            ])
            .build()
    }

    fn point<'a>(name: &'a str, attributes: &'a [KeyValue], value: PointValue) -> MetricPoint<'a> {
        MetricPoint {
            scope: "my.app",
            name,
            time: SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000),
            attributes: Attributes::from_key_values(attributes),
            value,
        }
    }

    fn map_one(point: &MetricPoint<'_>) -> TelemetryItem {
        let mut items = mapper().map_point(point, &resource()).unwrap();
        assert_eq!(items.len(), 1);
        items.remove(0)
    }

    fn data(item: &TelemetryItem) -> &MetricsData {
        match &item.data {
            MonitorDomain::Metric(data) => data,
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn custom_gauge() {
        let attributes = [KeyValue::new("queue", "orders")];
        let item = map_one(&point("queue.depth", &attributes, PointValue::Scalar(7.0)));
        assert_eq!(item.name, "Metric");
        assert_eq!(item.time, "2023-11-14T22:13:20.000000Z");
        assert_eq!(item.tag(context_tags::AI_CLOUD_ROLE), Some("checkout"));
        assert_eq!(item.property("queue"), Some("orders"));
        assert_eq!(item.property("_MS.MetricId"), None);
        let metric = &data(&item).metrics[0];
        assert_eq!(metric.name, "queue.depth");
        assert_eq!(metric.value, 7.0);
        assert_eq!(metric.count, None);
    }

    #[test]
    fn metric_name_override() {
        let attributes = [KeyValue::new(
            "applicationinsights.internal.metric_name",
            "Orders Pending",
        )];
        let item = map_one(&point("queue.depth", &attributes, PointValue::Scalar(1.0)));
        assert_eq!(data(&item).metrics[0].name, "Orders Pending");
        assert!(data(&item).properties.is_empty());
    }

    #[test]
    fn custom_histogram() {
        let item = map_one(&point(
            "payload.size",
            &[],
            PointValue::Histogram {
                count: 4,
                sum: 100.0,
                min: Some(10.0),
                max: Some(40.0),
            },
        ));
        let metric = &data(&item).metrics[0];
        assert_eq!(metric.value, 100.0);
        assert_eq!(metric.count, Some(4));
        assert_eq!(metric.min, Some(10.0));
        assert_eq!(metric.max, Some(40.0));
    }

    #[test]
    fn server_duration_is_a_standard_request_metric() {
        let attributes = [
            KeyValue::new("http.request.method", "GET"),
            KeyValue::new("http.response.status_code", 404),
        ];
        let items = mapper()
            .map_point(
                &point(
                    "http.server.request.duration",
                    &attributes,
                    PointValue::Histogram {
                        count: 2,
                        sum: 0.5,
                        min: Some(0.1),
                        max: Some(0.4),
                    },
                ),
                &resource(),
            )
            .unwrap();
        assert_eq!(items.len(), 2);
        let item = &items[0];
        assert_eq!(item.property("_MS.MetricId"), Some("requests/duration"));
        assert_eq!(item.property("_MS.IsAutocollected"), Some("True"));
        assert_eq!(item.property("request/resultCode"), Some("404"));
        assert_eq!(item.property("request/success"), Some("False"));
        assert_eq!(item.property("operation/synthetic"), Some("False"));
        assert_eq!(item.property("cloud/roleName"), Some("checkout"));
        assert_eq!(item.property("cloud/roleInstance"), Some("checkout-1"));
        assert_eq!(item.property("http.request.method"), None);
        let metric = &data(item).metrics[0];
        assert_eq!(metric.value, 500.0);
        assert_eq!(metric.min, Some(100.0));
        assert_eq!(metric.max, Some(400.0));

        let custom = &items[1];
        assert_eq!(custom.property("_MS.MetricId"), None);
        assert_eq!(custom.property("_MS.IsAutocollected"), None);
        assert_eq!(custom.property("http.request.method"), Some("GET"));
        assert_eq!(custom.property("http.response.status_code"), Some("404"));
        let metric = &data(custom).metrics[0];
        assert_eq!(metric.name, "http.server.request.duration");
        assert_eq!(metric.value, 0.5);
        assert_eq!(metric.count, Some(2));
        assert_eq!(metric.min, Some(0.1));
    }

    #[test]
    fn client_duration_is_a_standard_dependency_metric() {
        let attributes = [
            KeyValue::new("http.method", "GET"),
            KeyValue::new("http.status_code", 200),
            KeyValue::new("net.peer.name", "api.example.com"),
            KeyValue::new("net.peer.port", 8443),
        ];
        let items = mapper()
            .map_point(
                &point(
                    "http.client.duration",
                    &attributes,
                    PointValue::Histogram {
                        count: 1,
                        sum: 12.0,
                        min: None,
                        max: None,
                    },
                ),
                &resource(),
            )
            .unwrap();
        assert_eq!(items.len(), 2);
        let item = &items[0];
        assert_eq!(item.property("_MS.MetricId"), Some("dependencies/duration"));
        assert_eq!(item.property("dependency/type"), Some("Http"));
        assert_eq!(
            item.property("dependency/target"),
            Some("api.example.com:8443")
        );
        assert_eq!(item.property("dependency/resultCode"), Some("200"));
        assert_eq!(item.property("dependency/success"), Some("True"));
        // already in milliseconds
        assert_eq!(data(item).metrics[0].value, 12.0);
        assert_eq!(data(&items[1]).metrics[0].value, 12.0);
    }

    #[test]
    fn rpc_duration_custom_copy_depends_on_scope() {
        let histogram = PointValue::Histogram {
            count: 1,
            sum: 3.0,
            min: None,
            max: None,
        };
        let app = point("rpc.server.duration", &[], histogram);
        let items = mapper().map_point(&app, &resource()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].property("_MS.MetricId"), Some("requests/duration"));
        assert_eq!(items[1].property("_MS.MetricId"), None);

        let instrumented = MetricPoint {
            scope: "io.opentelemetry.grpc-1.6",
            ..point("rpc.client.duration", &[], histogram)
        };
        let items = mapper().map_point(&instrumented, &resource()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(
            items[0].property("_MS.MetricId"),
            Some("dependencies/duration")
        );

        let stable = MetricPoint {
            scope: "io.opentelemetry.netty-4.1",
            ..point("http.client.request.duration", &[], histogram)
        };
        assert_eq!(mapper().map_point(&stable, &resource()).unwrap().len(), 2);
    }

    #[test]
    fn pipeline_export_maps_every_point() {
        let exporter = InMemoryMetricExporter::default();
        let provider = SdkMeterProvider::builder()
            .with_reader(PeriodicReader::builder(exporter.clone()).build())
            .with_resource(resource())
            .build();
        let meter = provider.meter("test");

        let counter = meter.u64_counter("jobs.completed").build();
        counter.add(3, &[KeyValue::new("queue", "a")]);
        counter.add(2, &[KeyValue::new("queue", "b")]);
        let histogram = meter.f64_histogram("http.server.request.duration").build();
        histogram.record(0.25, &[KeyValue::new("http.response.status_code", 200)]);

        provider.force_flush().unwrap();
        let finished = exporter.get_finished_metrics().unwrap();
        let items: Vec<TelemetryItem> = finished
            .iter()
            .flat_map(|metrics| mapper().map(metrics).unwrap())
            .collect();

        let jobs: Vec<_> = items
            .iter()
            .filter(|item| data(item).metrics[0].name == "jobs.completed")
            .collect();
        assert_eq!(jobs.len(), 2);
        let total: f64 = jobs.iter().map(|item| data(item).metrics[0].value).sum();
        assert_eq!(total, 5.0);

        let durations: Vec<_> = items
            .iter()
            .filter(|item| data(item).metrics[0].name == "http.server.request.duration")
            .collect();
        assert_eq!(durations.len(), 2);
        let standard = durations
            .iter()
            .find(|item| item.property("_MS.MetricId").is_some())
            .unwrap();
        assert_eq!(data(standard).metrics[0].value, 250.0);
        assert_eq!(data(standard).metrics[0].count, Some(1));
        assert_eq!(standard.property("request/success"), Some("True"));
        assert_eq!(standard.tag(context_tags::AI_CLOUD_ROLE), Some("checkout"));
        let custom = durations
            .iter()
            .find(|item| item.property("_MS.MetricId").is_none())
            .unwrap();
        assert_eq!(data(custom).metrics[0].value, 0.25);
    }
}
