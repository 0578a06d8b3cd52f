//! Newline-delimited JSON, the body format of the ingestion endpoint.
use crate::models::TelemetryItem;

/// Separator written between items.
#[cfg(windows)]
pub const LINE_SEPARATOR: &[u8] = b"\r\n";
/// Separator written between items.
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &[u8] = b"\n";

/// Serializes items as compact JSON objects joined by [`LINE_SEPARATOR`].
/// There is no trailing separator.
pub fn to_ndjson(items: &[TelemetryItem]) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            buf.extend_from_slice(LINE_SEPARATOR);
        }
        serde_json::to_writer(&mut buf, item)?;
    }
    Ok(buf)
}
