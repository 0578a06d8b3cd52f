use opentelemetry::otel_warn;
use std::env;

/// Connection string of the Application Insights resource.
pub(crate) const ENV_CONNECTION_STRING: &str = "APPLICATIONINSIGHTS_CONNECTION_STRING";

/// Whether server spans with a 4xx status code count as failed.
pub(crate) const ENV_CAPTURE_HTTP_SERVER_4XX_AS_ERROR: &str =
    "APPLICATIONINSIGHTS_CAPTURE_HTTP_SERVER_4XX_AS_ERROR";

/// Whether log records carry their level as the `LoggingLevel` property.
pub(crate) const ENV_CAPTURE_LOGGING_LEVEL_AS_CUSTOM_DIMENSION: &str =
    "APPLICATIONINSIGHTS_CAPTURE_LOGGING_LEVEL_AS_CUSTOM_DIMENSION";

/// App Service site name, used as the role name when the resource has none.
pub(crate) const ENV_WEBSITE_SITE_NAME: &str = "WEBSITE_SITE_NAME";

pub(crate) const DEFAULT_CAPTURE_HTTP_SERVER_4XX_AS_ERROR: bool = true;
pub(crate) const DEFAULT_CAPTURE_LOGGING_LEVEL_AS_CUSTOM_DIMENSION: bool = false;

fn get(name: &str) -> Option<String> {
    env::var(name).ok().filter(|var| !var.is_empty())
}

fn get_bool(name: &'static str, default: bool) -> bool {
    match get(name) {
        Some(value) => match value.trim().to_ascii_lowercase().parse() {
            Ok(value) => value,
            Err(_) => {
                otel_warn!(
                    name: "AzureMonitor.Env.MalformedBoolean",
                    message = "malformed boolean, using the default",
                    variable = name,
                    value = value.as_str(),
                );
                default
            }
        },
        None => default,
    }
}

pub(crate) fn connection_string() -> Option<String> {
    get(ENV_CONNECTION_STRING)
}

pub(crate) fn capture_http_server_4xx_as_error() -> bool {
    get_bool(
        ENV_CAPTURE_HTTP_SERVER_4XX_AS_ERROR,
        DEFAULT_CAPTURE_HTTP_SERVER_4XX_AS_ERROR,
    )
}

pub(crate) fn capture_logging_level_as_custom_dimension() -> bool {
    get_bool(
        ENV_CAPTURE_LOGGING_LEVEL_AS_CUSTOM_DIMENSION,
        DEFAULT_CAPTURE_LOGGING_LEVEL_AS_CUSTOM_DIMENSION,
    )
}

pub(crate) fn website_site_name() -> Option<String> {
    get(ENV_WEBSITE_SITE_NAME)
}
