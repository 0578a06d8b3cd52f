use crate::connection_string::ConnectionString;
use crate::env;
use crate::error::ConnectionStringError;
use crate::resource::{resource_initializer, TelemetryInitializer};
use std::sync::Arc;

/// Settings shared by the span, log and metric mappers.
#[derive(Clone, Debug)]
pub struct ExporterConfig {
    connection_string: Option<Arc<ConnectionString>>,
    capture_http_server_4xx_as_error: bool,
    capture_logging_level_as_custom_dimension: bool,
    website_site_name: Option<String>,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        ExporterConfig {
            connection_string: None,
            capture_http_server_4xx_as_error: env::DEFAULT_CAPTURE_HTTP_SERVER_4XX_AS_ERROR,
            capture_logging_level_as_custom_dimension:
                env::DEFAULT_CAPTURE_LOGGING_LEVEL_AS_CUSTOM_DIMENSION,
            website_site_name: None,
        }
    }
}

impl ExporterConfig {
    pub fn new() -> Self {
        ExporterConfig::default()
    }

    /// Reads `APPLICATIONINSIGHTS_*` and `WEBSITE_SITE_NAME` variables.
    ///
    /// Fails only when a connection string is set and malformed.
    pub fn from_env() -> Result<Self, ConnectionStringError> {
        let connection_string = env::connection_string()
            .map(|value| ConnectionString::parse(&value).map(Arc::new))
            .transpose()?;
        Ok(ExporterConfig {
            connection_string,
            capture_http_server_4xx_as_error: env::capture_http_server_4xx_as_error(),
            capture_logging_level_as_custom_dimension:
                env::capture_logging_level_as_custom_dimension(),
            website_site_name: env::website_site_name(),
        })
    }

    /// Assign the connection string items are routed with.
    pub fn with_connection_string(mut self, connection_string: ConnectionString) -> Self {
        self.connection_string = Some(Arc::new(connection_string));
        self
    }

    /// Count server spans with a 4xx status code as failed (the default).
    /// When disabled only 5xx codes fail.
    pub fn with_capture_http_server_4xx_as_error(mut self, capture: bool) -> Self {
        self.capture_http_server_4xx_as_error = capture;
        self
    }

    /// Add the record level as the `LoggingLevel` property of log items.
    pub fn with_capture_logging_level_as_custom_dimension(mut self, capture: bool) -> Self {
        self.capture_logging_level_as_custom_dimension = capture;
        self
    }

    /// Role name used when the resource carries no service name.
    pub fn with_website_site_name<T: Into<String>>(mut self, name: T) -> Self {
        self.website_site_name = Some(name.into());
        self
    }

    pub fn connection_string(&self) -> Option<&ConnectionString> {
        self.connection_string.as_deref()
    }

    pub fn capture_http_server_4xx_as_error(&self) -> bool {
        self.capture_http_server_4xx_as_error
    }

    pub fn capture_logging_level_as_custom_dimension(&self) -> bool {
        self.capture_logging_level_as_custom_dimension
    }

    pub fn website_site_name(&self) -> Option<&str> {
        self.website_site_name.as_deref()
    }

    /// Initializer stamping this configuration and the resource onto items.
    pub fn telemetry_initializer(&self) -> TelemetryInitializer {
        resource_initializer(
            self.connection_string.clone(),
            self.website_site_name.clone(),
        )
    }
}
