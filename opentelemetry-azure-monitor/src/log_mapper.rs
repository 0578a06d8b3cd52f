//! Maps log records to message and exception items.
use crate::attributes::{AttributeValue, Attributes};
use crate::builder::TelemetryBuilder;
use crate::config::ExporterConfig;
use crate::context_tags;
use crate::error::MappingError;
use crate::exceptions::minimal_parse;
use crate::log_once::WarnOnce;
use crate::mappings::{apply_item_count, Mappings};
use crate::models::{MessageData, SeverityLevel, TelemetryExceptionData, TelemetryItem};
use crate::resource::TelemetryInitializer;
use crate::semconv;
use opentelemetry::logs::Severity;
use opentelemetry::trace::{SpanId, TraceId};
use opentelemetry::InstrumentationScope;
use opentelemetry_sdk::logs::SdkLogRecord;
use opentelemetry_sdk::Resource;
use std::fmt;
use std::sync::Arc;

const LOGGER_NAME: &str = "LoggerName";
const LOGGING_LEVEL: &str = "LoggingLevel";
const LOGGER_MESSAGE: &str = "Logger Message";
const SOURCE_TYPE: &str = "SourceType";
const SOURCE_TYPE_LOGGER: &str = "Logger";

/// Context-data prefixes of Java logging bridges; the remainder of the key
/// becomes the property name.
const MDC_PREFIXES: [&str; 4] = [
    "log4j.context_data.",
    "logback.mdc.",
    "log4j.mdc.",
    "jboss-logmanager.mdc.",
];

pub struct LogDataMapper {
    capture_logging_level_as_custom_dimension: bool,
    initializer: TelemetryInitializer,
    mappings: Mappings,
}

impl fmt::Debug for LogDataMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogDataMapper")
            .field(
                "capture_logging_level_as_custom_dimension",
                &self.capture_logging_level_as_custom_dimension,
            )
            .field("mappings", &self.mappings)
            .finish_non_exhaustive()
    }
}

impl LogDataMapper {
    pub fn new(
        capture_logging_level_as_custom_dimension: bool,
        initializer: TelemetryInitializer,
    ) -> Self {
        LogDataMapper {
            capture_logging_level_as_custom_dimension,
            initializer,
            mappings: log_mappings(Arc::new(WarnOnce::new())),
        }
    }

    pub fn from_config(config: &ExporterConfig) -> Self {
        LogDataMapper::new(
            config.capture_logging_level_as_custom_dimension(),
            config.telemetry_initializer(),
        )
    }

    /// Maps a record to an exception item when it carries
    /// `exception.stacktrace`, else to a message item.
    pub fn map(
        &self,
        record: &SdkLogRecord,
        scope: &InstrumentationScope,
        resource: &Resource,
    ) -> Result<TelemetryItem, MappingError> {
        let attributes = Attributes::from_log_attributes(record.attributes_iter());

        let mut builder = TelemetryBuilder::new();
        (self.initializer)(&mut builder, resource);
        if let Some(time) = record.timestamp().or_else(|| record.observed_timestamp()) {
            builder.set_time(time);
        }
        self.mappings.map(&attributes, &mut builder)?;

        if let Some(trace_context) = record.trace_context() {
            if trace_context.trace_id != TraceId::INVALID {
                builder.add_tag(
                    context_tags::AI_OPERATION_ID,
                    trace_context.trace_id.to_string(),
                );
            }
            if trace_context.span_id != SpanId::INVALID {
                builder.add_tag(
                    context_tags::AI_OPERATION_PARENT_ID,
                    trace_context.span_id.to_string(),
                );
            }
        }
        if let Some(name) = attributes.get_str(semconv::OPERATION_NAME) {
            builder.add_tag(context_tags::AI_OPERATION_NAME, name);
        }
        apply_item_count(&mut builder, &attributes);

        builder.add_property(SOURCE_TYPE, SOURCE_TYPE_LOGGER);
        if builder.property(LOGGER_NAME).is_none() {
            let logger_name = record
                .target()
                .map(|target| target.as_ref())
                .unwrap_or_else(|| scope.name());
            if !logger_name.is_empty() {
                builder.add_property(LOGGER_NAME, logger_name);
            }
        }

        let severity = record.severity_number();
        if self.capture_logging_level_as_custom_dimension {
            let level = record
                .severity_text()
                .or_else(|| severity.map(|severity| severity.name()));
            if let Some(level) = level {
                builder.add_property(LOGGING_LEVEL, level);
            }
        }

        let severity_level = Some(severity_level(severity));
        let body = record
            .body()
            .and_then(|body| AttributeValue::Any(body).to_property_string().ok())
            .unwrap_or_default();

        Ok(match attributes.get_str(semconv::EXCEPTION_STACKTRACE) {
            Some(stacktrace) => {
                if !body.is_empty() {
                    builder.add_property(LOGGER_MESSAGE, body);
                }
                builder.build(TelemetryExceptionData {
                    exceptions: minimal_parse(stacktrace),
                    severity_level,
                    ..Default::default()
                })
            }
            None => builder.build(MessageData {
                message: body,
                severity_level,
                ..Default::default()
            }),
        })
    }
}

fn log_mappings(deprecated: Arc<WarnOnce>) -> Mappings {
    let mut builder = Mappings::builder().common(deprecated);
    for prefix in MDC_PREFIXES {
        builder = builder.prefix(prefix, move |builder, key, value| {
            if let Ok(value) = value.to_property_string() {
                builder.add_property(&key[prefix.len()..], value);
            }
            Ok(())
        });
    }
    builder
        .ignore_prefix("exception.")
        .exact_string(semconv::CODE_FILEPATH, "FileName")
        .exact_string(semconv::CODE_NAMESPACE, "ClassName")
        .exact_string(semconv::CODE_FUNCTION, "MethodName")
        .exact_long(semconv::CODE_LINENO, "LineNumber")
        .exact_string(semconv::THREAD_NAME, "ThreadName")
        .exact_string(semconv::LOGGER_NAME, LOGGER_NAME)
        .build()
}

/// Severity number ranges: 1-8 trace/debug, 9-12 info, 13-16 warn,
/// 17-20 error, 21-24 fatal.
pub fn severity_level(severity: Option<Severity>) -> SeverityLevel {
    match severity.map(|severity| severity as i32) {
        Some(9..=12) => SeverityLevel::Information,
        Some(13..=16) => SeverityLevel::Warning,
        Some(17..=20) => SeverityLevel::Error,
        Some(21..=24) => SeverityLevel::Critical,
        _ => SeverityLevel::Verbose,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MonitorDomain;
    use crate::resource::resource_initializer;
    use opentelemetry::logs::{AnyValue, LogRecord, Logger, LoggerProvider};
    use opentelemetry::trace::TraceFlags;
    use opentelemetry_sdk::logs::SdkLoggerProvider;
    use std::time::{Duration, SystemTime};

    fn record() -> SdkLogRecord {
        let provider = SdkLoggerProvider::builder().build();
        provider.logger("test").create_log_record()
    }

    fn scope() -> InstrumentationScope {
        InstrumentationScope::builder("my.app").build()
    }

    fn map(mapper: &LogDataMapper, record: &SdkLogRecord) -> TelemetryItem {
        mapper
            .map(record, &scope(), &Resource::builder_empty().build())
            .unwrap()
    }

    fn mapper(capture_level: bool) -> LogDataMapper {
        LogDataMapper::new(capture_level, resource_initializer(None, None))
    }

    #[test]
    fn message_record() {
        let mut record = record();
        let time = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        record.set_timestamp(time);
        record.set_severity_number(Severity::Warn);
        record.set_body(AnyValue::from("disk almost full"));
        record.set_target("storage::monitor");
        record.add_attribute("code.lineno", 42);
        record.add_attribute("thread.name", "worker-1");
        record.add_attribute("logback.mdc.requestId", "r-17");
        record.add_attribute("tenant", "contoso");

        let item = map(&mapper(false), &record);
        assert_eq!(item.name, "Message");
        assert_eq!(item.time, "2023-11-14T22:13:20.000000Z");
        assert_eq!(item.property("LineNumber"), Some("42"));
        assert_eq!(item.property("ThreadName"), Some("worker-1"));
        assert_eq!(item.property("requestId"), Some("r-17"));
        assert_eq!(item.property("tenant"), Some("contoso"));
        assert_eq!(item.property("LoggerName"), Some("storage::monitor"));
        assert_eq!(item.property("SourceType"), Some("Logger"));
        assert_eq!(item.property("LoggingLevel"), None);
        match &item.data {
            MonitorDomain::Message(data) => {
                assert_eq!(data.message, "disk almost full");
                assert_eq!(data.severity_level, Some(SeverityLevel::Warning));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn exception_record() {
        let mut record = record();
        record.set_severity_number(Severity::Error);
        record.set_body(AnyValue::from("request failed"));
        record.add_attribute("exception.type", "IoError");
        record.add_attribute(
            "exception.stacktrace",
            "IoError: connection reset\n   at read",
        );

        let item = map(&mapper(false), &record);
        assert_eq!(item.name, "Exception");
        assert_eq!(item.property("Logger Message"), Some("request failed"));
        assert_eq!(item.property("exception.type"), None);
        match &item.data {
            MonitorDomain::Exception(data) => {
                assert_eq!(data.exceptions.len(), 1);
                assert_eq!(data.exceptions[0].type_name, "IoError");
                assert_eq!(data.exceptions[0].message, "connection reset");
                assert_eq!(data.severity_level, Some(SeverityLevel::Error));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn trace_context_tags() {
        let mut record = record();
        record.set_trace_context(
            TraceId::from_hex("4bf92f3577b34da6a3ce929d0e0e4736").unwrap(),
            SpanId::from_hex("00f067aa0ba902b7").unwrap(),
            Some(TraceFlags::SAMPLED),
        );
        record.add_attribute("applicationinsights.internal.operation_name", "GET /");

        let item = map(&mapper(false), &record);
        assert_eq!(
            item.tag(context_tags::AI_OPERATION_ID),
            Some("4bf92f3577b34da6a3ce929d0e0e4736")
        );
        assert_eq!(
            item.tag(context_tags::AI_OPERATION_PARENT_ID),
            Some("00f067aa0ba902b7")
        );
        assert_eq!(item.tag(context_tags::AI_OPERATION_NAME), Some("GET /"));
    }

    #[test]
    fn logging_level_dimension() {
        let mut record = record();
        record.set_severity_number(Severity::Info);
        assert_eq!(map(&mapper(true), &record).property("LoggingLevel"), Some("INFO"));

        record.set_severity_text("Information");
        assert_eq!(
            map(&mapper(true), &record).property("LoggingLevel"),
            Some("Information")
        );
    }

    #[test]
    fn logger_name_falls_back_to_scope_and_override_wins() {
        let record = record();
        assert_eq!(map(&mapper(false), &record).property("LoggerName"), Some("my.app"));

        let mut record = self::record();
        record.set_target("ignored");
        record.add_attribute("applicationinsights.internal.logger_name", "com.example.Foo");
        assert_eq!(
            map(&mapper(false), &record).property("LoggerName"),
            Some("com.example.Foo")
        );
    }

    #[test]
    fn severity_ranges() {
        assert_eq!(severity_level(None), SeverityLevel::Verbose);
        assert_eq!(severity_level(Some(Severity::Trace)), SeverityLevel::Verbose);
        assert_eq!(severity_level(Some(Severity::Debug4)), SeverityLevel::Verbose);
        assert_eq!(severity_level(Some(Severity::Info2)), SeverityLevel::Information);
        assert_eq!(severity_level(Some(Severity::Warn4)), SeverityLevel::Warning);
        assert_eq!(severity_level(Some(Severity::Error)), SeverityLevel::Error);
        assert_eq!(severity_level(Some(Severity::Fatal)), SeverityLevel::Critical);
    }

    #[test]
    fn malformed_override_is_an_error() {
        let mut record = record();
        record.add_attribute("applicationinsights.internal.connection_string", "nope");
        assert!(mapper(false)
            .map(&record, &scope(), &Resource::builder_empty().build())
            .is_err());
    }
}
