//! # OpenTelemetry Azure Monitor Exporter
//!
//! Maps OpenTelemetry spans, log records and metrics into the Azure Monitor
//! (Application Insights) telemetry schema and serializes them as the
//! newline-delimited JSON bodies the ingestion endpoint accepts.
//!
//! * Server and consumer spans become **requests**; client, producer and
//!   in-process spans become **dependencies**, with type, target and result
//!   code derived from the HTTP, RPC, database and messaging semantic
//!   conventions. Span events become messages and exceptions.
//! * Log records become **messages**, or **exceptions** when they carry an
//!   `exception.stacktrace`.
//! * Gauge, sum and histogram points become **metrics**; HTTP and RPC
//!   duration histograms are also reported as pre-aggregated standard metrics.
//!
//! The mappers are plain values ([`SpanDataMapper`], [`LogDataMapper`],
//! [`MetricDataMapper`]) and can be used without the SDK exporters.
//!
//! ## Quickstart
//!
//! ```no_run
//! use opentelemetry::trace::{Tracer, TracerProvider as _};
//! use opentelemetry_azure_monitor::{new_exporter, ConnectionString, ExporterConfig};
//! use opentelemetry_sdk::trace::SdkTracerProvider;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ExporterConfig::new().with_connection_string(ConnectionString::parse(
//!         "InstrumentationKey=00000000-0000-0000-0000-000000000000",
//!     )?);
//!     let exporter = new_exporter().with_config(config).build_span_exporter()?;
//!     let provider = SdkTracerProvider::builder()
//!         .with_simple_exporter(exporter)
//!         .build();
//!
//!     provider.tracer("my-app").in_span("doing_work", |_cx| {
//!         // Traced app logic here...
//!     });
//!
//!     provider.shutdown()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! Without an explicit [`ExporterConfig`] the builder reads
//! `APPLICATIONINSIGHTS_CONNECTION_STRING`,
//! `APPLICATIONINSIGHTS_CAPTURE_HTTP_SERVER_4XX_AS_ERROR`,
//! `APPLICATIONINSIGHTS_CAPTURE_LOGGING_LEVEL_AS_CUSTOM_DIMENSION` and
//! `WEBSITE_SITE_NAME`.
#![warn(missing_debug_implementations)]

mod attributes;
mod builder;
mod config;
mod connection_string;
pub mod context_tags;
mod default_ports;
mod env;
mod error;
mod exceptions;
mod exporter;
mod format;
mod log_mapper;
mod log_once;
mod mappings;
mod metric_mapper;
pub mod models;
mod resource;
pub mod sampling;
pub mod semconv;
mod serializer;
mod span_mapper;
mod url_parser;

pub use attributes::{AttributeValue, Attributes};
pub use builder::{TelemetryBuilder, MAX_PROPERTY_KEY_LENGTH, MAX_PROPERTY_VALUE_LENGTH};
pub use config::ExporterConfig;
pub use connection_string::ConnectionString;
pub use error::{ConnectionStringError, Error, MappingError};
pub use exceptions::minimal_parse;
pub use exporter::{
    new_exporter, AzureMonitorExporterBuilder, AzureMonitorLogExporter,
    AzureMonitorMetricExporter, AzureMonitorSpanExporter, InMemorySink, NdjsonSink,
    TelemetrySink,
};
pub use format::{format_duration, format_time};
pub use log_mapper::{severity_level, LogDataMapper};
pub use log_once::WarnOnce;
pub use mappings::{ExactMapping, Mappings, MappingsBuilder, PrefixMapping};
pub use metric_mapper::{points, AsF64, MetricDataMapper, MetricPoint, PointValue};
pub use models::TelemetryItem;
pub use resource::{apply_resource, resource_initializer, TelemetryInitializer, SDK_VERSION};
pub use serializer::{to_ndjson, LINE_SEPARATOR};
pub use span_mapper::{DependencyKind, SpanClass, SpanDataMapper};
