use crate::enums::{
    AccessTier, ArchiveStatus, BlobType, CopyStatusType, LeaseDurationType, LeaseStateType,
    LeaseStatusType, RehydratePriority,
};
use crate::headers::BlobHttpHeaders;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Properties returned by Get Blob Properties.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobProperties {
    creation_time: Option<DateTime<Utc>>,
    last_modified: Option<DateTime<Utc>>,
    e_tag: Option<String>,
    blob_type: Option<BlobType>,
    blob_size: Option<u64>,
    content_type: Option<String>,
    #[serde(default, with = "crate::base64_opt")]
    content_md5: Option<Vec<u8>>,
    content_encoding: Option<String>,
    content_disposition: Option<String>,
    content_language: Option<String>,
    cache_control: Option<String>,
    blob_sequence_number: Option<i64>,
    committed_block_count: Option<u32>,
    lease_status: Option<LeaseStatusType>,
    lease_state: Option<LeaseStateType>,
    lease_duration: Option<LeaseDurationType>,
    copy_id: Option<String>,
    copy_status: Option<CopyStatusType>,
    copy_source: Option<String>,
    copy_progress: Option<String>,
    copy_completion_time: Option<DateTime<Utc>>,
    copy_status_description: Option<String>,
    server_encrypted: Option<bool>,
    encryption_scope: Option<String>,
    access_tier: Option<AccessTier>,
    access_tier_inferred: Option<bool>,
    archive_status: Option<ArchiveStatus>,
    access_tier_change_time: Option<DateTime<Utc>>,
    rehydrate_priority: Option<RehydratePriority>,
    metadata: Option<BTreeMap<String, String>>,
    tag_count: Option<u32>,
    version_id: Option<String>,
    is_current_version: Option<bool>,
    sealed: Option<bool>,
    last_accessed_time: Option<DateTime<Utc>>,
    expires_on: Option<DateTime<Utc>>,
}

impl BlobProperties {
    pub fn new() -> Self {
        BlobProperties::default()
    }

    /// The content headers as a [`BlobHttpHeaders`], e.g. to copy them to
    /// another blob.
    pub fn http_headers(&self) -> BlobHttpHeaders {
        let mut headers = BlobHttpHeaders::new();
        if let Some(value) = &self.cache_control {
            headers.set_cache_control(value.as_str());
        }
        if let Some(value) = &self.content_type {
            headers.set_content_type(value.as_str());
        }
        if let Some(value) = &self.content_encoding {
            headers.set_content_encoding(value.as_str());
        }
        if let Some(value) = &self.content_language {
            headers.set_content_language(value.as_str());
        }
        if let Some(value) = &self.content_disposition {
            headers.set_content_disposition(value.as_str());
        }
        if let Some(value) = &self.content_md5 {
            headers.set_content_md5(value.clone());
        }
        headers
    }
}

accessors!(BlobProperties {
    creation_time / set_creation_time: copy DateTime<Utc>,
    last_modified / set_last_modified: copy DateTime<Utc>,
    e_tag / set_e_tag: str String,
    blob_type / set_blob_type: copy BlobType,
    /// Content length in bytes.
    blob_size / set_blob_size: copy u64,
    content_type / set_content_type: str String,
    content_md5 / set_content_md5: bytes Vec<u8>,
    content_encoding / set_content_encoding: str String,
    content_disposition / set_content_disposition: str String,
    content_language / set_content_language: str String,
    cache_control / set_cache_control: str String,
    /// Page blobs only.
    blob_sequence_number / set_blob_sequence_number: copy i64,
    /// Append blobs only.
    committed_block_count / set_committed_block_count: copy u32,
    lease_status / set_lease_status: copy LeaseStatusType,
    lease_state / set_lease_state: copy LeaseStateType,
    lease_duration / set_lease_duration: copy LeaseDurationType,
    copy_id / set_copy_id: str String,
    copy_status / set_copy_status: copy CopyStatusType,
    copy_source / set_copy_source: str String,
    /// `<bytes copied>/<total bytes>`.
    copy_progress / set_copy_progress: str String,
    copy_completion_time / set_copy_completion_time: copy DateTime<Utc>,
    copy_status_description / set_copy_status_description: str String,
    server_encrypted / set_server_encrypted: copy bool,
    encryption_scope / set_encryption_scope: str String,
    access_tier / set_access_tier: copy AccessTier,
    /// Whether the tier was inferred from the account default rather than
    /// set explicitly.
    access_tier_inferred / set_access_tier_inferred: copy bool,
    archive_status / set_archive_status: copy ArchiveStatus,
    access_tier_change_time / set_access_tier_change_time: copy DateTime<Utc>,
    rehydrate_priority / set_rehydrate_priority: copy RehydratePriority,
    metadata / set_metadata: borrow BTreeMap<String, String>,
    tag_count / set_tag_count: copy u32,
    version_id / set_version_id: str String,
    is_current_version / set_is_current_version: copy bool,
    /// Append blobs only.
    sealed / set_sealed: copy bool,
    last_accessed_time / set_last_accessed_time: copy DateTime<Utc>,
    expires_on / set_expires_on: copy DateTime<Utc>,
});

/// Properties of a blob as reported in a List Blobs page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobItemProperties {
    creation_time: Option<DateTime<Utc>>,
    last_modified: Option<DateTime<Utc>>,
    e_tag: Option<String>,
    content_length: Option<u64>,
    content_type: Option<String>,
    content_encoding: Option<String>,
    content_language: Option<String>,
    #[serde(default, with = "crate::base64_opt")]
    content_md5: Option<Vec<u8>>,
    content_disposition: Option<String>,
    cache_control: Option<String>,
    blob_sequence_number: Option<i64>,
    blob_type: Option<BlobType>,
    lease_status: Option<LeaseStatusType>,
    lease_state: Option<LeaseStateType>,
    lease_duration: Option<LeaseDurationType>,
    copy_id: Option<String>,
    copy_status: Option<CopyStatusType>,
    copy_source: Option<String>,
    copy_progress: Option<String>,
    copy_completion_time: Option<DateTime<Utc>>,
    server_encrypted: Option<bool>,
    access_tier: Option<AccessTier>,
    access_tier_inferred: Option<bool>,
    archive_status: Option<ArchiveStatus>,
    access_tier_change_time: Option<DateTime<Utc>>,
    deleted_time: Option<DateTime<Utc>>,
    remaining_retention_days: Option<u32>,
    tag_count: Option<u32>,
    sealed: Option<bool>,
}

impl BlobItemProperties {
    pub fn new() -> Self {
        BlobItemProperties::default()
    }
}

accessors!(BlobItemProperties {
    creation_time / set_creation_time: copy DateTime<Utc>,
    last_modified / set_last_modified: copy DateTime<Utc>,
    e_tag / set_e_tag: str String,
    content_length / set_content_length: copy u64,
    content_type / set_content_type: str String,
    content_encoding / set_content_encoding: str String,
    content_language / set_content_language: str String,
    content_md5 / set_content_md5: bytes Vec<u8>,
    content_disposition / set_content_disposition: str String,
    cache_control / set_cache_control: str String,
    blob_sequence_number / set_blob_sequence_number: copy i64,
    blob_type / set_blob_type: copy BlobType,
    lease_status / set_lease_status: copy LeaseStatusType,
    lease_state / set_lease_state: copy LeaseStateType,
    lease_duration / set_lease_duration: copy LeaseDurationType,
    copy_id / set_copy_id: str String,
    copy_status / set_copy_status: copy CopyStatusType,
    copy_source / set_copy_source: str String,
    copy_progress / set_copy_progress: str String,
    copy_completion_time / set_copy_completion_time: copy DateTime<Utc>,
    server_encrypted / set_server_encrypted: copy bool,
    access_tier / set_access_tier: copy AccessTier,
    access_tier_inferred / set_access_tier_inferred: copy bool,
    archive_status / set_archive_status: copy ArchiveStatus,
    access_tier_change_time / set_access_tier_change_time: copy DateTime<Utc>,
    /// Soft-deleted blobs only.
    deleted_time / set_deleted_time: copy DateTime<Utc>,
    /// Days until a soft-deleted blob is purged.
    remaining_retention_days / set_remaining_retention_days: copy u32,
    tag_count / set_tag_count: copy u32,
    sealed / set_sealed: copy bool,
});

/// One entry of a List Blobs page: a blob, or a virtual directory when
/// listing by hierarchy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobItem {
    name: String,
    deleted: Option<bool>,
    snapshot: Option<String>,
    version_id: Option<String>,
    is_current_version: Option<bool>,
    properties: Option<BlobItemProperties>,
    metadata: Option<BTreeMap<String, String>>,
    tags: Option<BTreeMap<String, String>>,
    has_versions_only: Option<bool>,
    is_prefix: Option<bool>,
}

impl BlobItem {
    pub fn new(name: impl Into<String>) -> Self {
        BlobItem {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }
}

accessors!(BlobItem {
    deleted / set_deleted: copy bool,
    /// Snapshot timestamp, for snapshot entries.
    snapshot / set_snapshot: str String,
    version_id / set_version_id: str String,
    is_current_version / set_is_current_version: copy bool,
    properties / set_properties: borrow BlobItemProperties,
    metadata / set_metadata: borrow BTreeMap<String, String>,
    tags / set_tags: borrow BTreeMap<String, String>,
    has_versions_only / set_has_versions_only: copy bool,
    /// Set on virtual directory entries of a hierarchical listing.
    is_prefix / set_is_prefix: copy bool,
});
