use opentelemetry_sdk::error::OTelSdkError;

/// Reasons a connection string is rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConnectionStringError {
    /// The connection string is empty or only whitespace.
    #[error("connection string is empty")]
    Empty,

    /// The connection string exceeds the maximum supported length.
    #[error("connection string is longer than {max} characters")]
    TooLong {
        /// Maximum accepted length.
        max: usize,
    },

    /// A segment is not of the form `Key=Value`.
    #[error("malformed connection string segment: {0:?}")]
    MalformedSegment(String),

    /// The same key appears more than once.
    #[error("duplicate key in connection string: {0}")]
    DuplicateKey(String),

    /// `InstrumentationKey` is missing or empty.
    #[error("connection string does not contain an instrumentation key")]
    MissingInstrumentationKey,

    /// An endpoint value is not a valid absolute URL.
    #[error("invalid {key} {value:?}: {source}")]
    InvalidEndpoint {
        /// Key the endpoint was read from.
        key: &'static str,
        /// The rejected value.
        value: String,
        /// Underlying parse failure.
        #[source]
        source: url::ParseError,
    },
}

/// Faults that abort the mapping of a single record.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum MappingError {
    /// A per-item connection string or instrumentation key override could not be parsed.
    #[error("invalid connection string override: {0}")]
    ConnectionString(#[from] ConnectionStringError),

    /// The metric aggregation has no Azure Monitor representation.
    #[error("unsupported metric data type: {0}")]
    UnsupportedMetricType(&'static str),
}

/// Wrap type for errors from the Azure Monitor exporter.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A record could not be mapped.
    #[error("mapping failed: {0}")]
    Mapping(#[from] MappingError),

    /// The exporter configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConnectionStringError),

    /// Items could not be serialized.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Writing a batch failed.
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),

    /// The exporter was already shut down.
    #[error("exporter is shut down")]
    AlreadyShutdown,

    /// Other errors
    #[error("export error: {0}")]
    Other(String),
}

impl From<Error> for OTelSdkError {
    fn from(err: Error) -> Self {
        match err {
            Error::AlreadyShutdown => OTelSdkError::AlreadyShutdown,
            other => OTelSdkError::InternalFailure(other.to_string()),
        }
    }
}
