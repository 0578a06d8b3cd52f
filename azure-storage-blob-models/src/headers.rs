use serde::{Deserialize, Serialize};

/// Standard HTTP headers stored with a blob and returned on download.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobHttpHeaders {
    #[serde(skip_serializing_if = "Option::is_none")]
    cache_control: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_encoding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_disposition: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::base64_opt"
    )]
    content_md5: Option<Vec<u8>>,
}

impl BlobHttpHeaders {
    pub fn new() -> Self {
        BlobHttpHeaders::default()
    }

    /// Header name and value for every field that is set, using the
    /// `x-ms-blob-*` names of the Put Blob and Set Blob Properties calls.
    pub fn to_request_headers(&self) -> Vec<(&'static str, String)> {
        use base64::engine::general_purpose::STANDARD;
        use base64::Engine as _;

        let mut headers = Vec::new();
        let text_fields = [
            ("x-ms-blob-cache-control", &self.cache_control),
            ("x-ms-blob-content-type", &self.content_type),
            ("x-ms-blob-content-encoding", &self.content_encoding),
            ("x-ms-blob-content-language", &self.content_language),
            ("x-ms-blob-content-disposition", &self.content_disposition),
        ];
        for (name, value) in text_fields {
            if let Some(value) = value {
                headers.push((name, value.clone()));
            }
        }
        if let Some(md5) = &self.content_md5 {
            headers.push(("x-ms-blob-content-md5", STANDARD.encode(md5)));
        }
        headers
    }
}

accessors!(BlobHttpHeaders {
    cache_control / set_cache_control: str String,
    content_type / set_content_type: str String,
    content_encoding / set_content_encoding: str String,
    content_language / set_content_language: str String,
    content_disposition / set_content_disposition: str String,
    /// Raw MD5 digest of the content, not its base64 form.
    content_md5 / set_content_md5: bytes Vec<u8>,
});
