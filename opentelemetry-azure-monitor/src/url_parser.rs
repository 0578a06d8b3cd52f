//! Authority and path extraction for HTTP dependency targets and names.
//!
//! Both read the URL as normalized by [`Url`]: an explicit default port is
//! dropped and dot segments in the path are resolved, so the results are not
//! always verbatim substrings of the input.
use url::Url;

/// `host[:port]` of an absolute URL, omitting the scheme's default port.
pub(crate) fn target(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str().filter(|host| !host.is_empty())?;
    Some(match parsed.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_owned(),
    })
}

/// Path component of an absolute URL, `/` when the URL has none.
pub(crate) fn path(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    if parsed.cannot_be_a_base() {
        return None;
    }
    Some(parsed.path().to_owned())
}
