//! Maps finished spans to request, dependency, message and exception items.
use crate::attributes::{AttributeValue, Attributes};
use crate::builder::TelemetryBuilder;
use crate::config::ExporterConfig;
use crate::context_tags;
use crate::default_ports;
use crate::error::MappingError;
use crate::exceptions::minimal_parse;
use crate::format::{elapsed, format_duration};
use crate::log_once::WarnOnce;
use crate::mappings::{apply_item_count, Mappings};
use crate::models::{
    MessageData, RemoteDependencyData, RequestData, TelemetryExceptionData,
    TelemetryExceptionDetails, TelemetryItem,
};
use crate::resource::TelemetryInitializer;
use crate::semconv;
use crate::url_parser;
use opentelemetry::trace::{SpanId, SpanKind, Status};
use opentelemetry::Value;
use opentelemetry_sdk::trace::SpanData;
use opentelemetry_sdk::Resource;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

const HTTP_DEPENDENCY_TYPE: &str = "Http";
const IN_PROC_DEPENDENCY_TYPE: &str = "InProc";
const COSMOS_DEPENDENCY_TYPE: &str = "Microsoft.DocumentDb";
const SQL_DEPENDENCY_TYPE: &str = "SQL";
const QUEUE_MESSAGE_TYPE_PREFIX: &str = "Queue Message | ";
const HTTP_SPAN_NAME_PREFIX: &str = "HTTP";
const HTTP_OTHER_METHOD: &str = "_OTHER";
const HTTP_METHODS: [&str; 9] = [
    "OPTIONS", "GET", "HEAD", "POST", "PUT", "DELETE", "TRACE", "CONNECT", "PATCH",
];
const MS_LINKS: &str = "_MS.links";
const TIME_SINCE_ENQUEUED: &str = "timeSinceEnqueued";

const COSMOS_DB_SYSTEM: &str = "cosmosdb";
const SQL_DB_SYSTEMS: [&str; 11] = [
    "db2",
    "derby",
    "mariadb",
    "mssql",
    "mysql",
    "oracle",
    "postgresql",
    "sqlite",
    "other_sql",
    "hsqldb",
    "h2",
];

/// Key prefixes of semantic conventions whose values already land in
/// standard item fields, so they are not repeated as custom properties.
const STANDARD_ATTRIBUTE_PREFIXES: [&str; 19] = [
    "http.",
    "db.",
    "message.",
    "messaging.",
    "rpc.",
    "enduser.",
    "net.",
    "network.",
    "peer.",
    "exception.",
    "thread.",
    "faas.",
    "code.",
    "job.",
    "url.",
    "server.",
    "client.",
    "user_agent.",
    "error.",
];

/// How a span is reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpanClass {
    /// Incoming work: reported as a request.
    Request,
    /// Outgoing call, or an in-process operation under a local parent.
    Dependency { in_proc: bool },
}

impl SpanClass {
    /// Classifies a span by kind, parent and messaging attributes.
    pub fn of(span: &SpanData, attributes: &Attributes<'_>) -> Self {
        let local_parent = has_local_parent(span);
        match span.span_kind {
            SpanKind::Internal if local_parent => SpanClass::Dependency { in_proc: true },
            SpanKind::Internal => SpanClass::Request,
            SpanKind::Client | SpanKind::Producer => SpanClass::Dependency { in_proc: false },
            SpanKind::Consumer
                if attributes.get_str(semconv::MESSAGING_OPERATION) == Some("receive") =>
            {
                SpanClass::Dependency { in_proc: false }
            }
            SpanKind::Consumer
                if local_parent
                    && is_azure_sdk_messaging(attributes.get_str(semconv::AZURE_SDK_NAMESPACE)) =>
            {
                SpanClass::Dependency { in_proc: false }
            }
            SpanKind::Server | SpanKind::Consumer => SpanClass::Request,
        }
    }
}

/// Semantic-convention family of a dependency, decided by which attributes
/// are present.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DependencyKind<'a> {
    Http { method: &'a str },
    Rpc { system: &'a str },
    Database { system: &'a str },
    Messaging { system: &'a str },
    Other,
}

impl<'a> DependencyKind<'a> {
    pub fn detect(attributes: &Attributes<'a>) -> Self {
        if let Some(method) =
            attributes.get_str_either(semconv::HTTP_REQUEST_METHOD, semconv::HTTP_METHOD)
        {
            DependencyKind::Http { method }
        } else if let Some(system) = attributes.get_str(semconv::RPC_SYSTEM) {
            DependencyKind::Rpc { system }
        } else if let Some(system) = attributes.get_str(semconv::DB_SYSTEM) {
            DependencyKind::Database { system }
        } else if let Some(system) = messaging_system(attributes) {
            DependencyKind::Messaging { system }
        } else {
            DependencyKind::Other
        }
    }
}

/// Converts [`SpanData`] into Azure Monitor items.
pub struct SpanDataMapper {
    capture_http_server_4xx_as_error: bool,
    initializer: TelemetryInitializer,
    mappings: Mappings,
}

impl fmt::Debug for SpanDataMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpanDataMapper")
            .field(
                "capture_http_server_4xx_as_error",
                &self.capture_http_server_4xx_as_error,
            )
            .field("mappings", &self.mappings)
            .finish_non_exhaustive()
    }
}

impl SpanDataMapper {
    pub fn new(capture_http_server_4xx_as_error: bool, initializer: TelemetryInitializer) -> Self {
        SpanDataMapper {
            capture_http_server_4xx_as_error,
            initializer,
            mappings: span_mappings(Arc::new(WarnOnce::new())),
        }
    }

    pub fn from_config(config: &ExporterConfig) -> Self {
        SpanDataMapper::new(
            config.capture_http_server_4xx_as_error(),
            config.telemetry_initializer(),
        )
    }

    /// Maps the span itself, ignoring its events.
    pub fn map(&self, span: &SpanData, resource: &Resource) -> Result<TelemetryItem, MappingError> {
        let attributes = Attributes::from_key_values(&span.attributes);
        match SpanClass::of(span, &attributes) {
            SpanClass::Request => self.map_request(span, &attributes, resource),
            SpanClass::Dependency { in_proc } => {
                self.map_dependency(span, &attributes, resource, in_proc)
            }
        }
    }

    /// Maps the span followed by one item per event.
    pub fn map_with_events(
        &self,
        span: &SpanData,
        resource: &Resource,
    ) -> Result<Vec<TelemetryItem>, MappingError> {
        let mut items = vec![self.map(span, resource)?];
        self.map_events(span, resource, &mut items)?;
        Ok(items)
    }

    fn start(
        &self,
        span: &SpanData,
        attributes: &Attributes<'_>,
        resource: &Resource,
    ) -> Result<TelemetryBuilder, MappingError> {
        let mut builder = TelemetryBuilder::new();
        (self.initializer)(&mut builder, resource);
        builder.set_time(span.start_time);
        self.mappings.map(attributes, &mut builder)?;
        builder.add_tag(
            context_tags::AI_OPERATION_ID,
            span.span_context.trace_id().to_string(),
        );
        apply_item_count(&mut builder, attributes);
        if let Some(links) = links_property(span) {
            builder.add_property(MS_LINKS, links);
        }
        Ok(builder)
    }

    fn map_request(
        &self,
        span: &SpanData,
        attributes: &Attributes<'_>,
        resource: &Resource,
    ) -> Result<TelemetryItem, MappingError> {
        let mut builder = self.start(span, attributes, resource)?;

        if let Some(parent) = attributes.get_str(semconv::LEGACY_PARENT_ID) {
            builder.add_tag(context_tags::AI_OPERATION_PARENT_ID, parent);
        } else if span.parent_span_id != SpanId::INVALID {
            builder.add_tag(
                context_tags::AI_OPERATION_PARENT_ID,
                span.parent_span_id.to_string(),
            );
        }
        if let Some(root) = attributes.get_str(semconv::LEGACY_ROOT_ID) {
            builder.add_tag(context_tags::AI_LEGACY_ROOT_ID, root);
        }

        let name = operation_name(span, attributes);
        builder.add_tag(context_tags::AI_OPERATION_NAME, name.as_str());

        if let Some(ip) = attributes
            .get_str(semconv::CLIENT_ADDRESS)
            .or_else(|| attributes.get_str(semconv::HTTP_CLIENT_IP))
            .or_else(|| attributes.get_str(semconv::NET_SOCK_PEER_ADDR))
        {
            builder.add_tag(context_tags::AI_LOCATION_IP, ip);
        }
        for (key, tag) in [
            (semconv::SESSION_ID, context_tags::AI_SESSION_ID),
            (semconv::DEVICE_OS, context_tags::AI_DEVICE_OS),
            (semconv::DEVICE_OS_VERSION, context_tags::AI_DEVICE_OS_VERSION),
        ] {
            if let Some(value) = attributes.get_str(key) {
                builder.add_tag(tag, value);
            }
        }
        if attributes.get_bool(semconv::IS_SYNTHETIC) == Some(true) {
            builder.add_tag(context_tags::AI_OPERATION_SYNTHETIC_SOURCE, "True");
        }
        if let Some(enqueued) = time_since_enqueued(span, attributes) {
            builder.add_measurement(TIME_SINCE_ENQUEUED, enqueued);
        }

        let request = RequestData {
            id: span.span_context.span_id().to_string(),
            name: Some(name),
            duration: format_duration(elapsed(span.start_time, span.end_time)),
            success: self.is_success(span, attributes),
            response_code: response_code(attributes),
            source: attributes
                .get_str(semconv::SPAN_SOURCE)
                .map(str::to_owned)
                .or_else(|| messaging_source(attributes)),
            url: request_url(attributes),
            ..Default::default()
        };
        Ok(builder.build(request))
    }

    fn map_dependency(
        &self,
        span: &SpanData,
        attributes: &Attributes<'_>,
        resource: &Resource,
        in_proc: bool,
    ) -> Result<TelemetryItem, MappingError> {
        let mut builder = self.start(span, attributes, resource)?;
        if span.parent_span_id != SpanId::INVALID {
            builder.add_tag(
                context_tags::AI_OPERATION_PARENT_ID,
                span.parent_span_id.to_string(),
            );
        }
        if let Some(name) = attributes.get_str(semconv::OPERATION_NAME) {
            builder.add_tag(context_tags::AI_OPERATION_NAME, name);
        }

        let mut dependency = RemoteDependencyData {
            id: Some(span.span_context.span_id().to_string()),
            name: span.name.to_string(),
            duration: format_duration(elapsed(span.start_time, span.end_time)),
            success: Some(self.is_success(span, attributes)),
            ..Default::default()
        };

        if in_proc {
            dependency.dependency_type = Some(IN_PROC_DEPENDENCY_TYPE.to_owned());
        } else {
            match DependencyKind::detect(attributes) {
                DependencyKind::Http { method } => {
                    apply_http(&mut dependency, span, attributes, method)
                }
                DependencyKind::Rpc { system } => apply_rpc(&mut dependency, attributes, system),
                DependencyKind::Database { system } => {
                    apply_database(&mut dependency, attributes, system)
                }
                DependencyKind::Messaging { system } => {
                    apply_messaging(&mut dependency, span, attributes, system)
                }
                DependencyKind::Other => apply_other(&mut dependency, attributes),
            }
        }
        Ok(builder.build(dependency))
    }

    fn map_events(
        &self,
        span: &SpanData,
        resource: &Resource,
        items: &mut Vec<TelemetryItem>,
    ) -> Result<(), MappingError> {
        let span_attributes = Attributes::from_key_values(&span.attributes);
        let operation_name = match SpanClass::of(span, &span_attributes) {
            SpanClass::Request => Some(operation_name(span, &span_attributes)),
            SpanClass::Dependency { .. } => span_attributes
                .get_str(semconv::OPERATION_NAME)
                .map(str::to_owned),
        };

        for event in &span.events.events {
            let attributes = Attributes::from_key_values(&event.attributes);
            let is_exception = attributes.contains(semconv::EXCEPTION_TYPE)
                || attributes.contains(semconv::EXCEPTION_MESSAGE);
            // exceptions are reported on the request level only
            if is_exception && has_local_parent(span) {
                continue;
            }

            let mut builder = TelemetryBuilder::new();
            (self.initializer)(&mut builder, resource);
            builder.add_tag(
                context_tags::AI_OPERATION_ID,
                span.span_context.trace_id().to_string(),
            );
            builder.add_tag(
                context_tags::AI_OPERATION_PARENT_ID,
                span.span_context.span_id().to_string(),
            );
            if let Some(name) = &operation_name {
                builder.add_tag(context_tags::AI_OPERATION_NAME, name.as_str());
            }
            apply_item_count(&mut builder, &span_attributes);

            if is_exception {
                builder.set_time(span.end_time);
                self.mappings.map(&attributes, &mut builder)?;
                let exceptions = match attributes.get_str(semconv::EXCEPTION_STACKTRACE) {
                    Some(stacktrace) => minimal_parse(stacktrace),
                    None => vec![exception_without_stack(&attributes)],
                };
                items.push(builder.build(TelemetryExceptionData {
                    exceptions,
                    ..Default::default()
                }));
            } else {
                builder.set_time(event.timestamp);
                self.mappings.map(&attributes, &mut builder)?;
                items.push(builder.build(MessageData {
                    message: event.name.to_string(),
                    ..Default::default()
                }));
            }
        }
        Ok(())
    }

    fn is_success(&self, span: &SpanData, attributes: &Attributes<'_>) -> bool {
        match &span.status {
            Status::Error { .. } => false,
            Status::Ok => true,
            Status::Unset => {
                let error_threshold = if self.capture_http_server_4xx_as_error {
                    400
                } else {
                    500
                };
                attributes
                    .get_i64_either(
                        semconv::HTTP_RESPONSE_STATUS_CODE,
                        semconv::HTTP_STATUS_CODE,
                    )
                    .map_or(true, |code| code < error_threshold)
            }
        }
    }
}

fn span_mappings(deprecated: Arc<WarnOnce>) -> Mappings {
    let mut builder = Mappings::builder();
    for prefix in STANDARD_ATTRIBUTE_PREFIXES {
        builder = builder.ignore_prefix(prefix);
    }
    builder
        .common(deprecated)
        .ignore_exact(semconv::AZURE_SDK_NAMESPACE)
        .ignore_exact(semconv::AZURE_SDK_MESSAGE_BUS_DESTINATION)
        .ignore_exact(semconv::AZURE_SDK_ENQUEUED_TIME)
        .ignore_exact(semconv::KAFKA_RECORD_QUEUE_TIME_MS)
        .ignore_exact(semconv::KAFKA_OFFSET)
        .exact_tag(semconv::USER_AGENT_ORIGINAL, context_tags::AI_USER_AGENT)
        .exact_tag(semconv::HTTP_USER_AGENT, context_tags::AI_USER_AGENT)
        .prefix(semconv::HTTP_REQUEST_HEADER_PREFIX, header_property)
        .prefix(semconv::HTTP_RESPONSE_HEADER_PREFIX, header_property)
        .build()
}

/// Captured headers are string arrays; the values are joined with `,` as
/// they would be on the wire.
fn header_property(
    builder: &mut TelemetryBuilder,
    key: &str,
    value: AttributeValue<'_>,
) -> Result<(), MappingError> {
    let joined = match value {
        AttributeValue::Value(Value::Array(opentelemetry::Array::String(values))) => Some(
            values
                .iter()
                .map(|value| value.as_str())
                .collect::<Vec<_>>()
                .join(","),
        ),
        other => other.to_property_string().ok(),
    };
    if let Some(joined) = joined {
        builder.add_property(key, joined);
    }
    Ok(())
}

fn has_local_parent(span: &SpanData) -> bool {
    span.parent_span_id != SpanId::INVALID && !span.parent_span_is_remote
}

fn is_azure_sdk_messaging(namespace: Option<&str>) -> bool {
    matches!(
        namespace,
        Some("Microsoft.EventHub") | Some("Microsoft.ServiceBus")
    )
}

fn messaging_system<'a>(attributes: &Attributes<'a>) -> Option<&'a str> {
    let namespace = attributes.get_str(semconv::AZURE_SDK_NAMESPACE);
    if is_azure_sdk_messaging(namespace) {
        namespace
    } else {
        attributes.get_str(semconv::MESSAGING_SYSTEM)
    }
}

/// Operation name override, else `"{method} {name}"` for path-like span
/// names, else the span name.
fn operation_name(span: &SpanData, attributes: &Attributes<'_>) -> String {
    if let Some(name) = attributes.get_str(semconv::OPERATION_NAME) {
        return name.to_owned();
    }
    let name = span.name.as_ref();
    match attributes.get_str_either(semconv::HTTP_REQUEST_METHOD, semconv::HTTP_METHOD) {
        Some(method) if !method.is_empty() && name.starts_with('/') => format!("{method} {name}"),
        _ => name.to_owned(),
    }
}

/// Span names HTTP client instrumentation emits by default: a known method,
/// optionally prefixed with `HTTP `, or `HTTP` alone for unknown methods.
fn is_default_http_span_name(span_name: &str) -> bool {
    let method = match span_name.strip_prefix(HTTP_SPAN_NAME_PREFIX) {
        Some("") => return true,
        Some(rest) => match rest.strip_prefix(' ') {
            Some(method) => method,
            None => return false,
        },
        None => span_name,
    };
    HTTP_METHODS.contains(&method)
}

/// `"{METHOD} {path}"` for spans carrying a default instrumentation name.
fn http_dependency_name(span_name: &str, method: &str, url: Option<&str>) -> Option<String> {
    if !is_default_http_span_name(span_name) {
        return None;
    }
    let method = match method {
        "" | HTTP_OTHER_METHOD => HTTP_SPAN_NAME_PREFIX,
        method => method,
    };
    let path = url_parser::path(url?)?;
    Some(if path.is_empty() {
        format!("{method} /")
    } else {
        format!("{method} {path}")
    })
}

fn host_port(host: &str, port: Option<i64>, default_port: Option<i64>) -> String {
    match port {
        Some(port) if Some(port) != default_port => format!("{host}:{port}"),
        _ => host.to_owned(),
    }
}

/// Remote endpoint from peer/server/network attributes. The port is shown
/// unless it equals `default_port`.
pub(crate) fn target_or_none(attributes: &Attributes<'_>, default_port: Option<i64>) -> Option<String> {
    if let Some(peer_service) = attributes.get_str(semconv::PEER_SERVICE) {
        return Some(peer_service.to_owned());
    }
    if let Some(host) = attributes.get_str(semconv::SERVER_ADDRESS) {
        return Some(host_port(
            host,
            attributes.get_i64(semconv::SERVER_PORT),
            default_port,
        ));
    }
    if let Some(host) = attributes.get_str(semconv::NET_PEER_NAME) {
        return Some(host_port(
            host,
            attributes.get_i64(semconv::NET_PEER_PORT),
            default_port,
        ));
    }
    let host = attributes
        .get_str(semconv::NET_SOCK_PEER_NAME)
        .or_else(|| attributes.get_str(semconv::NET_SOCK_PEER_ADDR))?;
    Some(host_port(
        host,
        attributes.get_i64(semconv::NET_SOCK_PEER_PORT),
        default_port,
    ))
}

fn null_aware_concat(first: Option<String>, second: Option<&str>, separator: &str) -> Option<String> {
    match (first, second) {
        (Some(first), Some(second)) => Some(format!("{first}{separator}{second}")),
        (Some(first), None) => Some(first),
        (None, second) => second.map(str::to_owned),
    }
}

fn http_url<'a>(attributes: &Attributes<'a>) -> Option<&'a str> {
    attributes.get_str_either(semconv::URL_FULL, semconv::HTTP_URL)
}

fn apply_http(
    dependency: &mut RemoteDependencyData,
    span: &SpanData,
    attributes: &Attributes<'_>,
    method: &str,
) {
    let url = http_url(attributes);
    if let Some(name) = http_dependency_name(&span.name, method, url) {
        dependency.name = name;
    }
    let default_port = default_ports::for_http_url(url).or_else(|| {
        default_ports::for_http_scheme(
            attributes.get_str_either(semconv::URL_SCHEME, semconv::HTTP_SCHEME),
        )
    });
    let target = target_or_none(attributes, default_port)
        .or_else(|| url.and_then(url_parser::target))
        .unwrap_or_else(|| HTTP_DEPENDENCY_TYPE.to_owned());

    dependency.dependency_type = Some(HTTP_DEPENDENCY_TYPE.to_owned());
    dependency.target = Some(target);
    dependency.result_code = Some(
        attributes
            .get_i64_either(
                semconv::HTTP_RESPONSE_STATUS_CODE,
                semconv::HTTP_STATUS_CODE,
            )
            .map_or_else(|| "0".to_owned(), |code| code.to_string()),
    );
    dependency.data = url.map(str::to_owned);
}

fn apply_rpc(dependency: &mut RemoteDependencyData, attributes: &Attributes<'_>, system: &str) {
    dependency.dependency_type = Some(system.to_owned());
    dependency.target =
        Some(target_or_none(attributes, None).unwrap_or_else(|| system.to_owned()));
    dependency.result_code = attributes
        .get_i64(semconv::RPC_GRPC_STATUS_CODE)
        .map(|code| code.to_string());
}

fn apply_database(dependency: &mut RemoteDependencyData, attributes: &Attributes<'_>, system: &str) {
    let dependency_type = if SQL_DB_SYSTEMS.contains(&system) {
        match system {
            "mysql" => "mysql",
            "postgresql" => "postgresql",
            _ => SQL_DEPENDENCY_TYPE,
        }
    } else if system == COSMOS_DB_SYSTEM {
        COSMOS_DEPENDENCY_TYPE
    } else {
        system
    };
    dependency.dependency_type = Some(dependency_type.to_owned());
    dependency.data = attributes
        .get_str(semconv::DB_STATEMENT)
        .or_else(|| attributes.get_str(semconv::DB_OPERATION))
        .map(str::to_owned);

    let (target, db_name) = if system == COSMOS_DB_SYSTEM {
        (
            attributes
                .get_str(semconv::AZURE_SDK_DB_URL)
                .and_then(url_parser::target),
            attributes.get_str(semconv::AZURE_SDK_DB_INSTANCE),
        )
    } else {
        (
            target_or_none(attributes, default_ports::for_db_system(system)),
            attributes.get_str(semconv::DB_NAME),
        )
    };
    dependency.target =
        Some(null_aware_concat(target, db_name, " | ").unwrap_or_else(|| system.to_owned()));
}

fn apply_messaging(
    dependency: &mut RemoteDependencyData,
    span: &SpanData,
    attributes: &Attributes<'_>,
    system: &str,
) {
    dependency.dependency_type = Some(if span.span_kind == SpanKind::Producer {
        format!("{QUEUE_MESSAGE_TYPE_PREFIX}{system}")
    } else {
        system.to_owned()
    });
    dependency.target = messaging_source(attributes);
}

fn apply_other(dependency: &mut RemoteDependencyData, attributes: &Attributes<'_>) {
    match target_or_none(attributes, None) {
        Some(target) => dependency.target = Some(target),
        // no target: reported as in-process
        None => dependency.dependency_type = Some(IN_PROC_DEPENDENCY_TYPE.to_owned()),
    }
}

/// Messaging source (requests) or target (dependencies).
fn messaging_source(attributes: &Attributes<'_>) -> Option<String> {
    if is_azure_sdk_messaging(attributes.get_str(semconv::AZURE_SDK_NAMESPACE)) {
        if let Some(peer) = attributes.get_str(semconv::AZURE_SDK_PEER_ADDRESS) {
            return null_aware_concat(
                Some(peer.to_owned()),
                attributes.get_str(semconv::AZURE_SDK_MESSAGE_BUS_DESTINATION),
                "/",
            );
        }
    }
    let system = messaging_system(attributes)?;
    let destination = attributes.get_str_either(
        semconv::MESSAGING_DESTINATION_NAME,
        semconv::MESSAGING_DESTINATION,
    );
    null_aware_concat(target_or_none(attributes, None), destination, "/")
        .or_else(|| Some(system.to_owned()))
}

fn response_code(attributes: &Attributes<'_>) -> String {
    attributes
        .get_i64_either(
            semconv::HTTP_RESPONSE_STATUS_CODE,
            semconv::HTTP_STATUS_CODE,
        )
        .or_else(|| attributes.get_i64(semconv::RPC_GRPC_STATUS_CODE))
        .map_or_else(|| "0".to_owned(), |code| code.to_string())
}

/// Full request URL, from `url.full`/`http.url` or reassembled from parts.
fn request_url(attributes: &Attributes<'_>) -> Option<String> {
    if let Some(url) = http_url(attributes) {
        return Some(url.to_owned());
    }
    if let (Some(scheme), Some(host), Some(target)) = (
        attributes.get_str(semconv::HTTP_SCHEME),
        attributes.get_str(semconv::HTTP_HOST),
        attributes.get_str(semconv::HTTP_TARGET),
    ) {
        return Some(format!("{scheme}://{host}{target}"));
    }
    let scheme = attributes.get_str(semconv::URL_SCHEME)?;
    let host = attributes.get_str(semconv::SERVER_ADDRESS)?;
    let path = attributes.get_str(semconv::URL_PATH).unwrap_or_default();
    let authority = host_port(
        host,
        attributes.get_i64(semconv::SERVER_PORT),
        default_ports::for_http_scheme(Some(scheme)),
    );
    Some(match attributes.get_str(semconv::URL_QUERY) {
        Some(query) => format!("{scheme}://{authority}{path}?{query}"),
        None => format!("{scheme}://{authority}{path}"),
    })
}

/// Milliseconds between enqueue and processing start, never negative.
fn time_since_enqueued(span: &SpanData, attributes: &Attributes<'_>) -> Option<f64> {
    if let Some(enqueued_secs) = attributes.get_i64(semconv::AZURE_SDK_ENQUEUED_TIME) {
        let enqueued =
            SystemTime::UNIX_EPOCH + Duration::from_secs(u64::try_from(enqueued_secs).ok()?);
        return Some(elapsed(enqueued, span.start_time).as_millis() as f64);
    }
    attributes
        .get_i64(semconv::KAFKA_RECORD_QUEUE_TIME_MS)
        .map(|millis| millis.max(0) as f64)
}

#[derive(Serialize)]
struct LinkReference {
    #[serde(rename = "operation_Id")]
    operation_id: String,
    id: String,
}

/// `[{"operation_Id":"<trace id>","id":"<span id>"}]`, or `None` without links.
fn links_property(span: &SpanData) -> Option<String> {
    if span.links.links.is_empty() {
        return None;
    }
    let links: Vec<LinkReference> = span
        .links
        .links
        .iter()
        .map(|link| LinkReference {
            operation_id: link.span_context.trace_id().to_string(),
            id: link.span_context.span_id().to_string(),
        })
        .collect();
    serde_json::to_string(&links).ok()
}

fn exception_without_stack(attributes: &Attributes<'_>) -> TelemetryExceptionDetails {
    let type_name = attributes.get_str(semconv::EXCEPTION_TYPE);
    let message = attributes.get_str(semconv::EXCEPTION_MESSAGE);
    TelemetryExceptionDetails::builder()
        .type_name(type_name.or(message).unwrap_or_default())
        .message(message.or(type_name).unwrap_or_default())
        .build()
}
