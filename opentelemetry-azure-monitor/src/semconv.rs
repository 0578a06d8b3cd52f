//! # Attribute keys
//!
//! The OpenTelemetry semantic convention keys the mappers read, in both their
//! current and older spellings, plus the `applicationinsights.internal.` keys
//! that instrumentation uses to pass values straight through to Azure Monitor.
//!
//! Current keys are re-exported from `opentelemetry_semantic_conventions`;
//! spellings that crate no longer carries as plain constants are kept here.

pub use opentelemetry_semantic_conventions::attribute::{
    CLIENT_ADDRESS, EXCEPTION_MESSAGE, EXCEPTION_STACKTRACE, EXCEPTION_TYPE,
    HTTP_REQUEST_METHOD, HTTP_RESPONSE_STATUS_CODE, MESSAGING_DESTINATION_NAME, MESSAGING_SYSTEM,
    PEER_SERVICE, RPC_GRPC_STATUS_CODE, RPC_SYSTEM, SERVER_ADDRESS, SERVER_PORT, THREAD_NAME,
    URL_FULL, URL_PATH, URL_QUERY, URL_SCHEME, USER_AGENT_ORIGINAL,
};
pub use opentelemetry_semantic_conventions::resource::{
    HOST_NAME, SERVICE_INSTANCE_ID, SERVICE_NAME, SERVICE_NAMESPACE, SERVICE_VERSION,
};

// Older HTTP / network conventions, still emitted by plenty of instrumentation.

/// HTTP request method.
pub const HTTP_METHOD: &str = "http.method";
/// HTTP response status code.
pub const HTTP_STATUS_CODE: &str = "http.status_code";
/// Full HTTP request URL.
pub const HTTP_URL: &str = "http.url";
/// The URI scheme identifying the used protocol.
pub const HTTP_SCHEME: &str = "http.scheme";
/// The value of the HTTP host header.
pub const HTTP_HOST: &str = "http.host";
/// The full request target as passed in a HTTP request line.
pub const HTTP_TARGET: &str = "http.target";
/// The IP address of the original client behind all proxies.
pub const HTTP_CLIENT_IP: &str = "http.client_ip";
/// Value of the HTTP User-Agent header.
pub const HTTP_USER_AGENT: &str = "http.user_agent";
/// Prefix of captured request headers.
pub const HTTP_REQUEST_HEADER_PREFIX: &str = "http.request.header.";
/// Prefix of captured response headers.
pub const HTTP_RESPONSE_HEADER_PREFIX: &str = "http.response.header.";
/// Logical remote hostname.
pub const NET_PEER_NAME: &str = "net.peer.name";
/// Logical remote port number.
pub const NET_PEER_PORT: &str = "net.peer.port";
/// Remote socket peer name.
pub const NET_SOCK_PEER_NAME: &str = "net.sock.peer.name";
/// Remote socket peer address.
pub const NET_SOCK_PEER_ADDR: &str = "net.sock.peer.addr";
/// Remote socket peer port.
pub const NET_SOCK_PEER_PORT: &str = "net.sock.peer.port";

// Older database and messaging conventions.

/// An identifier for the database management system (DBMS) product being used.
pub const DB_SYSTEM: &str = "db.system";
/// The name of the database being accessed.
pub const DB_NAME: &str = "db.name";
/// The database statement being executed.
pub const DB_STATEMENT: &str = "db.statement";
/// The name of the operation being executed.
pub const DB_OPERATION: &str = "db.operation";
/// A string identifying the kind of messaging operation.
pub const MESSAGING_OPERATION: &str = "messaging.operation";
/// The message destination name, older spelling.
pub const MESSAGING_DESTINATION: &str = "messaging.destination";

// Older code location and end user conventions.

/// The source code file name that identifies the code unit.
pub const CODE_FILEPATH: &str = "code.filepath";
/// The "namespace" within which `code.function` is defined.
pub const CODE_NAMESPACE: &str = "code.namespace";
/// The method or function name.
pub const CODE_FUNCTION: &str = "code.function";
/// The line number in `code.filepath` best representing the operation.
pub const CODE_LINENO: &str = "code.lineno";
/// Username or client id extracted from the access token.
pub const ENDUSER_ID: &str = "enduser.id";

// Azure SDK conventions that predate the OpenTelemetry messaging/database ones.

/// Azure resource provider namespace.
pub const AZURE_SDK_NAMESPACE: &str = "az.namespace";
/// Fully qualified messaging namespace.
pub const AZURE_SDK_PEER_ADDRESS: &str = "peer.address";
/// Messaging entity (queue, topic, event hub) name.
pub const AZURE_SDK_MESSAGE_BUS_DESTINATION: &str = "message_bus.destination";
/// Time the message was enqueued, in epoch seconds.
pub const AZURE_SDK_ENQUEUED_TIME: &str = "x-opt-enqueued-time";
/// Cosmos database type.
pub const AZURE_SDK_DB_TYPE: &str = "db.type";
/// Cosmos database instance.
pub const AZURE_SDK_DB_INSTANCE: &str = "db.instance";
/// Cosmos account URL.
pub const AZURE_SDK_DB_URL: &str = "db.url";
/// Time the kafka record spent in the queue.
pub const KAFKA_RECORD_QUEUE_TIME_MS: &str = "kafka.record.queue_time_ms";
/// Kafka record offset.
pub const KAFKA_OFFSET: &str = "kafka.offset";

// Azure Monitor pass-through keys.

/// Prefix shared by every key that is consumed by the mappers and never emitted.
pub const INTERNAL_PREFIX: &str = "applicationinsights.internal.";
/// Overrides the connection string a single item is routed with.
pub const CONNECTION_STRING: &str = "applicationinsights.internal.connection_string";
/// Overrides the instrumentation key a single item is routed with.
pub const INSTRUMENTATION_KEY: &str = "applicationinsights.internal.instrumentation_key";
/// Overrides the cloud role name.
pub const ROLE_NAME: &str = "applicationinsights.internal.role_name";
/// Overrides the cloud role instance.
pub const ROLE_INSTANCE: &str = "applicationinsights.internal.role_instance";
/// Overrides the application version.
pub const APPLICATION_VERSION: &str = "applicationinsights.internal.application_version";
/// Overrides the operation name.
pub const OPERATION_NAME: &str = "applicationinsights.internal.operation_name";
/// Number of items represented by a sampled item.
pub const ITEM_COUNT: &str = "applicationinsights.internal.item_count";
/// Parent id that did not fit the W3C span id format.
pub const LEGACY_PARENT_ID: &str = "applicationinsights.internal.legacy_parent_id";
/// Root id that did not fit the W3C trace id format.
pub const LEGACY_ROOT_ID: &str = "applicationinsights.internal.legacy_root_id";
/// Marks synthetic (availability test, bot) traffic.
pub const IS_SYNTHETIC: &str = "applicationinsights.internal.is_synthetic";
/// Session id.
pub const SESSION_ID: &str = "applicationinsights.internal.session_id";
/// Device operating system.
pub const DEVICE_OS: &str = "applicationinsights.internal.operating_system";
/// Device operating system version.
pub const DEVICE_OS_VERSION: &str = "applicationinsights.internal.operating_system_version";
/// Request source.
pub const SPAN_SOURCE: &str = "applicationinsights.internal.source";
/// Logger name.
pub const LOGGER_NAME: &str = "applicationinsights.internal.logger_name";
/// Overrides the emitted metric name.
pub const METRIC_NAME: &str = "applicationinsights.internal.metric_name";

// Deprecated pass-through keys, warned about once and otherwise ignored.

/// Deprecated, see [`CONNECTION_STRING`].
pub const DEPRECATED_CONNECTION_STRING: &str = "ai.preview.connection_string";
/// Deprecated, see [`INSTRUMENTATION_KEY`].
pub const DEPRECATED_INSTRUMENTATION_KEY: &str = "ai.preview.instrumentation_key";
/// Deprecated, see [`ROLE_NAME`].
pub const DEPRECATED_ROLE_NAME: &str = "ai.preview.service_name";
/// Deprecated, see [`ROLE_INSTANCE`].
pub const DEPRECATED_ROLE_INSTANCE: &str = "ai.preview.service_instance_id";
/// Deprecated, see [`APPLICATION_VERSION`].
pub const DEPRECATED_APPLICATION_VERSION: &str = "ai.preview.service_version";
