use crate::error::ConnectionStringError;
use std::str::FromStr;
use url::Url;

const MAX_LENGTH: usize = 4096;

const INSTRUMENTATION_KEY: &str = "InstrumentationKey";
const INGESTION_ENDPOINT: &str = "IngestionEndpoint";
const LIVE_ENDPOINT: &str = "LiveEndpoint";
const ENDPOINT_SUFFIX: &str = "EndpointSuffix";
const LOCATION: &str = "Location";

const DEFAULT_INGESTION_ENDPOINT: &str = "https://dc.services.visualstudio.com/";
const DEFAULT_LIVE_ENDPOINT: &str = "https://rt.services.visualstudio.com/";
const TRACK_PATH: &str = "v2.1/track";

/// Parsed Application Insights connection string.
///
/// ```
/// use opentelemetry_azure_monitor::ConnectionString;
///
/// let connection_string: ConnectionString =
///     "InstrumentationKey=00000000-0000-0000-0000-000000000000;IngestionEndpoint=https://westus2-1.in.applicationinsights.azure.com/"
///         .parse()
///         .unwrap();
/// assert_eq!(
///     connection_string.track_url().as_str(),
///     "https://westus2-1.in.applicationinsights.azure.com/v2.1/track"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectionString {
    instrumentation_key: String,
    ingestion_endpoint: Url,
    live_endpoint: Url,
}

impl ConnectionString {
    /// Parses `;`-separated `Key=Value` pairs. Keys are case-insensitive.
    pub fn parse(input: &str) -> Result<Self, ConnectionStringError> {
        if input.len() > MAX_LENGTH {
            return Err(ConnectionStringError::TooLong { max: MAX_LENGTH });
        }
        if input.trim().is_empty() {
            return Err(ConnectionStringError::Empty);
        }

        let mut instrumentation_key = None;
        let mut ingestion_endpoint = None;
        let mut live_endpoint = None;
        let mut endpoint_suffix = None;
        let mut location = None;

        for segment in input.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            let (key, value) = segment
                .split_once('=')
                .ok_or_else(|| ConnectionStringError::MalformedSegment(segment.to_owned()))?;
            let (key, value) = (key.trim(), value.trim());
            let slot = if key.eq_ignore_ascii_case(INSTRUMENTATION_KEY) {
                &mut instrumentation_key
            } else if key.eq_ignore_ascii_case(INGESTION_ENDPOINT) {
                &mut ingestion_endpoint
            } else if key.eq_ignore_ascii_case(LIVE_ENDPOINT) {
                &mut live_endpoint
            } else if key.eq_ignore_ascii_case(ENDPOINT_SUFFIX) {
                &mut endpoint_suffix
            } else if key.eq_ignore_ascii_case(LOCATION) {
                &mut location
            } else {
                // unknown keys (e.g. AadAudience) are accepted and ignored
                continue;
            };
            if slot.is_some() {
                return Err(ConnectionStringError::DuplicateKey(key.to_owned()));
            }
            *slot = Some(value);
        }

        let instrumentation_key = instrumentation_key
            .filter(|ikey| !ikey.is_empty())
            .ok_or(ConnectionStringError::MissingInstrumentationKey)?
            .to_owned();

        let suffix = endpoint_suffix
            .map(|suffix| suffix.trim_start_matches('.'))
            .filter(|suffix| !suffix.is_empty());
        let location = location.filter(|location| !location.is_empty());

        let ingestion_endpoint = match (ingestion_endpoint, suffix) {
            (Some(endpoint), _) => parse_endpoint(INGESTION_ENDPOINT, endpoint)?,
            (None, Some(suffix)) => {
                parse_endpoint(ENDPOINT_SUFFIX, &suffixed_endpoint("dc", location, suffix))?
            }
            (None, None) => parse_endpoint(INGESTION_ENDPOINT, DEFAULT_INGESTION_ENDPOINT)?,
        };
        let live_endpoint = match (live_endpoint, suffix) {
            (Some(endpoint), _) => parse_endpoint(LIVE_ENDPOINT, endpoint)?,
            (None, Some(suffix)) => {
                parse_endpoint(ENDPOINT_SUFFIX, &suffixed_endpoint("live", location, suffix))?
            }
            (None, None) => parse_endpoint(LIVE_ENDPOINT, DEFAULT_LIVE_ENDPOINT)?,
        };

        Ok(ConnectionString {
            instrumentation_key,
            ingestion_endpoint,
            live_endpoint,
        })
    }

    pub fn instrumentation_key(&self) -> &str {
        &self.instrumentation_key
    }

    /// Base ingestion endpoint, always ending with `/`.
    pub fn ingestion_endpoint(&self) -> &Url {
        &self.ingestion_endpoint
    }

    pub fn live_endpoint(&self) -> &Url {
        &self.live_endpoint
    }

    /// Endpoint telemetry batches are posted to: `{ingestion}/v2.1/track`.
    pub fn track_url(&self) -> Url {
        let mut url = self.ingestion_endpoint.clone();
        let path = format!("{}{}", url.path(), TRACK_PATH);
        url.set_path(&path);
        url
    }
}

impl FromStr for ConnectionString {
    type Err = ConnectionStringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConnectionString::parse(s)
    }
}

fn suffixed_endpoint(prefix: &str, location: Option<&str>, suffix: &str) -> String {
    match location {
        Some(location) => format!("https://{location}.{prefix}.{suffix}/"),
        None => format!("https://{prefix}.{suffix}/"),
    }
}

fn parse_endpoint(key: &'static str, value: &str) -> Result<Url, ConnectionStringError> {
    let invalid = |source| ConnectionStringError::InvalidEndpoint {
        key,
        value: value.to_owned(),
        source,
    };
    let mut url = Url::parse(value).map_err(invalid)?;
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(invalid(url::ParseError::EmptyHost));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
