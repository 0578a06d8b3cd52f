use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Preconditions a blob request is evaluated against.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobRequestConditions {
    #[serde(skip_serializing_if = "Option::is_none")]
    if_match: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    if_none_match: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    if_modified_since: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    if_unmodified_since: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lease_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags_conditions: Option<String>,
}

impl BlobRequestConditions {
    pub fn new() -> Self {
        BlobRequestConditions::default()
    }

    /// Request headers for the conditions that are set. Dates use the
    /// RFC 1123 form HTTP requires.
    pub fn to_request_headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = Vec::new();
        if let Some(etag) = &self.if_match {
            headers.push(("If-Match", etag.clone()));
        }
        if let Some(etag) = &self.if_none_match {
            headers.push(("If-None-Match", etag.clone()));
        }
        if let Some(time) = self.if_modified_since {
            headers.push(("If-Modified-Since", http_date(time)));
        }
        if let Some(time) = self.if_unmodified_since {
            headers.push(("If-Unmodified-Since", http_date(time)));
        }
        if let Some(lease_id) = &self.lease_id {
            headers.push(("x-ms-lease-id", lease_id.clone()));
        }
        if let Some(tags) = &self.tags_conditions {
            headers.push(("x-ms-if-tags", tags.clone()));
        }
        headers
    }
}

fn http_date(time: DateTime<Utc>) -> String {
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

accessors!(BlobRequestConditions {
    /// ETag the blob must match.
    if_match / set_if_match: str String,
    /// ETag the blob must not match. `*` requires that the blob not exist.
    if_none_match / set_if_none_match: str String,
    if_modified_since / set_if_modified_since: copy DateTime<Utc>,
    if_unmodified_since / set_if_unmodified_since: copy DateTime<Utc>,
    /// Active lease the blob must hold.
    lease_id / set_lease_id: str String,
    /// SQL-like predicate over the blob's tags, e.g. `"project" = 'apollo'`.
    tags_conditions / set_tags_conditions: str String,
});
