use opentelemetry::logs::{LogRecord as _, Logger as _, LoggerProvider as _, Severity};
use opentelemetry::metrics::MeterProvider as _;
use opentelemetry::trace::{Span as _, SpanKind, Status, Tracer as _, TracerProvider as _};
use opentelemetry::KeyValue;
use opentelemetry_azure_monitor::context_tags;
use opentelemetry_azure_monitor::models::{MonitorDomain, SeverityLevel};
use opentelemetry_azure_monitor::{new_exporter, ConnectionString, ExporterConfig, InMemorySink};
use opentelemetry_sdk::logs::SdkLoggerProvider;
use opentelemetry_sdk::metrics::{PeriodicReader, SdkMeterProvider};
use opentelemetry_sdk::trace::SdkTracerProvider;
use opentelemetry_sdk::Resource;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

const IKEY: &str = "00000000-0000-0000-0000-000000000000";

fn config() -> ExporterConfig {
    let connection_string =
        ConnectionString::parse(&format!("InstrumentationKey={IKEY}")).expect("valid");
    ExporterConfig::new().with_connection_string(connection_string)
}

fn resource() -> Resource {
    Resource::builder_empty()
        .with_attributes([
            KeyValue::new("service.name", "checkout"),
            KeyValue::new("service.instance.id", "checkout-1"),
        ])
        .build()
}

#[derive(Clone, Debug, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn spans_export_requests_and_dependencies() {
    let sink = InMemorySink::new();
    let exporter = new_exporter()
        .with_config(config())
        .with_sink(sink.clone())
        .build_span_exporter()
        .unwrap();
    let provider = SdkTracerProvider::builder()
        .with_simple_exporter(exporter)
        .with_resource(resource())
        .build();
    let tracer = provider.tracer("integration");

    let mut server = tracer
        .span_builder("GET /cart")
        .with_kind(SpanKind::Server)
        .with_attributes([
            KeyValue::new("http.request.method", "GET"),
            KeyValue::new("http.response.status_code", 200),
            KeyValue::new("url.scheme", "https"),
            KeyValue::new("url.path", "/cart"),
            KeyValue::new("server.address", "shop.example.com"),
        ])
        .start(&tracer);
    server.set_status(Status::Ok);
    let trace_id = server.span_context().trace_id();
    server.end();

    let mut client = tracer
        .span_builder("SELECT")
        .with_kind(SpanKind::Client)
        .with_attributes([
            KeyValue::new("db.system", "postgresql"),
            KeyValue::new("db.statement", "SELECT * FROM carts"),
            KeyValue::new("server.address", "db.internal"),
        ])
        .start(&tracer);
    client.end();

    let items = sink.get_finished_items().unwrap();
    assert_eq!(items.len(), 2);

    let request = &items[0];
    assert_eq!(request.name, "Request");
    assert_eq!(request.instrumentation_key.as_deref(), Some(IKEY));
    assert_eq!(request.tag(context_tags::AI_CLOUD_ROLE), Some("checkout"));
    assert_eq!(
        request.tag(context_tags::AI_OPERATION_ID),
        Some(trace_id.to_string().as_str())
    );
    match &request.data {
        MonitorDomain::Request(data) => {
            assert!(data.success);
            assert_eq!(data.response_code, "200");
            assert_eq!(data.url.as_deref(), Some("https://shop.example.com/cart"));
        }
        other => panic!("expected a request, got {other:?}"),
    }

    let dependency = &items[1];
    assert_eq!(dependency.name, "RemoteDependency");
    match &dependency.data {
        MonitorDomain::RemoteDependency(data) => {
            assert_eq!(data.dependency_type.as_deref(), Some("postgresql"));
            assert_eq!(data.data.as_deref(), Some("SELECT * FROM carts"));
            assert_eq!(data.target.as_deref(), Some("db.internal"));
        }
        other => panic!("expected a dependency, got {other:?}"),
    }

    provider.shutdown().unwrap();
}

#[test]
fn logs_export_messages() {
    let sink = InMemorySink::new();
    let exporter = new_exporter()
        .with_config(config())
        .with_sink(sink.clone())
        .build_log_exporter()
        .unwrap();
    let provider = SdkLoggerProvider::builder()
        .with_simple_exporter(exporter)
        .with_resource(resource())
        .build();
    let logger = provider.logger("payments");

    let mut record = logger.create_log_record();
    record.set_body("card declined".into());
    record.set_severity_number(Severity::Warn);
    record.set_severity_text("WARN");
    record.add_attribute("order.id", "A-17");
    logger.emit(record);

    let items = sink.get_finished_items().unwrap();
    assert_eq!(items.len(), 1);
    let item = &items[0];
    assert_eq!(item.name, "Message");
    assert_eq!(item.tag(context_tags::AI_CLOUD_ROLE_INSTANCE), Some("checkout-1"));
    assert_eq!(item.property("LoggerName"), Some("payments"));
    assert_eq!(item.property("order.id"), Some("A-17"));
    match &item.data {
        MonitorDomain::Message(data) => {
            assert_eq!(data.message, "card declined");
            assert_eq!(data.severity_level, Some(SeverityLevel::Warning));
        }
        other => panic!("expected a message, got {other:?}"),
    }
}

#[test]
fn metrics_export_delta_points() {
    let sink = InMemorySink::new();
    let exporter = new_exporter()
        .with_config(config())
        .with_sink(sink.clone())
        .build_metric_exporter()
        .unwrap();
    let provider = SdkMeterProvider::builder()
        .with_reader(PeriodicReader::builder(exporter).build())
        .with_resource(resource())
        .build();
    let counter = provider.meter("integration").u64_counter("orders").build();

    counter.add(4, &[]);
    provider.force_flush().unwrap();
    counter.add(1, &[]);
    provider.force_flush().unwrap();

    let values: Vec<f64> = sink
        .get_finished_items()
        .unwrap()
        .iter()
        .filter_map(|item| match &item.data {
            MonitorDomain::Metric(data) if data.metrics[0].name == "orders" => {
                Some(data.metrics[0].value)
            }
            _ => None,
        })
        .collect();
    assert_eq!(values, vec![4.0, 1.0]);

    provider.shutdown().unwrap();
}

#[test]
fn writer_receives_one_line_per_item() {
    let buf = SharedBuf::default();
    let exporter = new_exporter()
        .with_config(config())
        .with_writer(buf.clone())
        .build_span_exporter()
        .unwrap();
    let provider = SdkTracerProvider::builder()
        .with_simple_exporter(exporter)
        .build();
    let tracer = provider.tracer("integration");
    tracer.in_span("background job", |_cx| {});

    let output = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 1);
    let json: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(json["iKey"], IKEY);
    assert_eq!(json["name"], "Request");
    assert_eq!(json["data"]["baseType"], "RequestData");
    assert_eq!(json["data"]["baseData"]["name"], "background job");
}
