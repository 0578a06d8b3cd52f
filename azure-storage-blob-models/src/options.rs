//! Option bags for list, download and upload calls.

use crate::conditions::BlobRequestConditions;
use crate::enums::AccessTier;
use crate::headers::BlobHttpHeaders;
use crate::range::BlobRange;
use crate::BlobModelError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

const MIB: u64 = 1024 * 1024;

/// Largest block accepted by Put Block.
pub const MAX_STAGE_BLOCK_BYTES: u64 = 4000 * MIB;
/// Largest blob accepted by a single Put Blob.
pub const MAX_UPLOAD_BLOB_BYTES: u64 = 5000 * MIB;
/// Largest page the service returns from a list call.
pub const MAX_LIST_RESULTS: u32 = 5000;

fn check_range(
    name: &'static str,
    constraint: &'static str,
    value: u64,
    min: u64,
    max: u64,
) -> Result<(), BlobModelError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(BlobModelError::OutOfRange {
            name,
            constraint,
            value,
        })
    }
}

/// Which optional datasets a List Blobs call includes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BlobListDetails {
    retrieve_copy: bool,
    retrieve_metadata: bool,
    retrieve_tags: bool,
    retrieve_snapshots: bool,
    retrieve_uncommitted_blobs: bool,
    retrieve_deleted_blobs: bool,
    retrieve_versions: bool,
}

impl BlobListDetails {
    pub fn new() -> Self {
        BlobListDetails::default()
    }

    pub fn retrieve_copy(&self) -> bool {
        self.retrieve_copy
    }

    pub fn set_retrieve_copy(&mut self, value: bool) -> &mut Self {
        self.retrieve_copy = value;
        self
    }

    pub fn retrieve_metadata(&self) -> bool {
        self.retrieve_metadata
    }

    pub fn set_retrieve_metadata(&mut self, value: bool) -> &mut Self {
        self.retrieve_metadata = value;
        self
    }

    pub fn retrieve_tags(&self) -> bool {
        self.retrieve_tags
    }

    pub fn set_retrieve_tags(&mut self, value: bool) -> &mut Self {
        self.retrieve_tags = value;
        self
    }

    pub fn retrieve_snapshots(&self) -> bool {
        self.retrieve_snapshots
    }

    pub fn set_retrieve_snapshots(&mut self, value: bool) -> &mut Self {
        self.retrieve_snapshots = value;
        self
    }

    /// Blocks that were staged but never committed.
    pub fn retrieve_uncommitted_blobs(&self) -> bool {
        self.retrieve_uncommitted_blobs
    }

    pub fn set_retrieve_uncommitted_blobs(&mut self, value: bool) -> &mut Self {
        self.retrieve_uncommitted_blobs = value;
        self
    }

    pub fn retrieve_deleted_blobs(&self) -> bool {
        self.retrieve_deleted_blobs
    }

    pub fn set_retrieve_deleted_blobs(&mut self, value: bool) -> &mut Self {
        self.retrieve_deleted_blobs = value;
        self
    }

    pub fn retrieve_versions(&self) -> bool {
        self.retrieve_versions
    }

    pub fn set_retrieve_versions(&mut self, value: bool) -> &mut Self {
        self.retrieve_versions = value;
        self
    }

    /// Values of the `include` query parameter, in the service's order.
    pub fn include_values(&self) -> Vec<&'static str> {
        [
            (self.retrieve_copy, "copy"),
            (self.retrieve_deleted_blobs, "deleted"),
            (self.retrieve_metadata, "metadata"),
            (self.retrieve_snapshots, "snapshots"),
            (self.retrieve_tags, "tags"),
            (self.retrieve_uncommitted_blobs, "uncommittedblobs"),
            (self.retrieve_versions, "versions"),
        ]
        .into_iter()
        .filter_map(|(enabled, value)| enabled.then_some(value))
        .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListBlobsOptions {
    details: BlobListDetails,
    prefix: Option<String>,
    max_results_per_page: Option<u32>,
}

impl ListBlobsOptions {
    pub fn new() -> Self {
        ListBlobsOptions::default()
    }

    pub fn details(&self) -> &BlobListDetails {
        &self.details
    }

    pub fn set_details(&mut self, details: BlobListDetails) -> &mut Self {
        self.details = details;
        self
    }

    /// Only blobs whose names start with this prefix are listed.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn set_prefix(&mut self, prefix: impl Into<String>) -> &mut Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn max_results_per_page(&self) -> Option<u32> {
        self.max_results_per_page
    }

    /// Page size hint. Must be at least 1; the service caps it at
    /// [`MAX_LIST_RESULTS`].
    pub fn set_max_results_per_page(&mut self, max: u32) -> Result<&mut Self, BlobModelError> {
        check_range(
            "max_results_per_page",
            "at least 1",
            u64::from(max),
            1,
            u64::MAX,
        )?;
        self.max_results_per_page = Some(max);
        Ok(self)
    }
}

/// Chunking and concurrency of uploads and downloads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParallelTransferOptions {
    block_size: Option<u64>,
    max_concurrency: Option<u32>,
    max_single_upload_size: Option<u64>,
}

impl ParallelTransferOptions {
    pub const DEFAULT_BLOCK_SIZE: u64 = 4 * MIB;
    pub const DEFAULT_MAX_CONCURRENCY: u32 = 8;
    pub const DEFAULT_MAX_SINGLE_UPLOAD_SIZE: u64 = 256 * MIB;

    pub fn new() -> Self {
        ParallelTransferOptions::default()
    }

    pub fn block_size(&self) -> Option<u64> {
        self.block_size
    }

    /// Must be between 1 and [`MAX_STAGE_BLOCK_BYTES`].
    pub fn set_block_size(&mut self, size: u64) -> Result<&mut Self, BlobModelError> {
        check_range(
            "block_size",
            "between 1 and 4000 MiB",
            size,
            1,
            MAX_STAGE_BLOCK_BYTES,
        )?;
        self.block_size = Some(size);
        Ok(self)
    }

    pub fn max_concurrency(&self) -> Option<u32> {
        self.max_concurrency
    }

    pub fn set_max_concurrency(&mut self, max: u32) -> Result<&mut Self, BlobModelError> {
        check_range("max_concurrency", "at least 1", u64::from(max), 1, u64::MAX)?;
        self.max_concurrency = Some(max);
        Ok(self)
    }

    pub fn max_single_upload_size(&self) -> Option<u64> {
        self.max_single_upload_size
    }

    /// Uploads up to this size go out as one Put Blob. Must be between 1 and
    /// [`MAX_UPLOAD_BLOB_BYTES`].
    pub fn set_max_single_upload_size(&mut self, size: u64) -> Result<&mut Self, BlobModelError> {
        check_range(
            "max_single_upload_size",
            "between 1 and 5000 MiB",
            size,
            1,
            MAX_UPLOAD_BLOB_BYTES,
        )?;
        self.max_single_upload_size = Some(size);
        Ok(self)
    }

    pub fn effective_block_size(&self) -> u64 {
        self.block_size.unwrap_or(Self::DEFAULT_BLOCK_SIZE)
    }

    pub fn effective_max_concurrency(&self) -> u32 {
        self.max_concurrency.unwrap_or(Self::DEFAULT_MAX_CONCURRENCY)
    }

    pub fn effective_max_single_upload_size(&self) -> u64 {
        self.max_single_upload_size
            .unwrap_or(Self::DEFAULT_MAX_SINGLE_UPLOAD_SIZE)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlobDownloadToFileOptions {
    file_path: PathBuf,
    range: Option<BlobRange>,
    parallel_transfer_options: Option<ParallelTransferOptions>,
    max_retry_requests: Option<u32>,
    request_conditions: Option<BlobRequestConditions>,
    retrieve_content_md5: bool,
}

impl BlobDownloadToFileOptions {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        BlobDownloadToFileOptions {
            file_path: file_path.into(),
            range: None,
            parallel_transfer_options: None,
            max_retry_requests: None,
            request_conditions: None,
            retrieve_content_md5: false,
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn range(&self) -> Option<&BlobRange> {
        self.range.as_ref()
    }

    pub fn set_range(&mut self, range: BlobRange) -> &mut Self {
        self.range = Some(range);
        self
    }

    pub fn parallel_transfer_options(&self) -> Option<&ParallelTransferOptions> {
        self.parallel_transfer_options.as_ref()
    }

    pub fn set_parallel_transfer_options(&mut self, options: ParallelTransferOptions) -> &mut Self {
        self.parallel_transfer_options = Some(options);
        self
    }

    /// Retries per chunk after a broken download stream.
    pub fn max_retry_requests(&self) -> Option<u32> {
        self.max_retry_requests
    }

    pub fn set_max_retry_requests(&mut self, retries: u32) -> &mut Self {
        self.max_retry_requests = Some(retries);
        self
    }

    pub fn request_conditions(&self) -> Option<&BlobRequestConditions> {
        self.request_conditions.as_ref()
    }

    pub fn set_request_conditions(&mut self, conditions: BlobRequestConditions) -> &mut Self {
        self.request_conditions = Some(conditions);
        self
    }

    /// Request the MD5 of each ranged chunk.
    pub fn retrieve_content_md5(&self) -> bool {
        self.retrieve_content_md5
    }

    pub fn set_retrieve_content_md5(&mut self, value: bool) -> &mut Self {
        self.retrieve_content_md5 = value;
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlobParallelUploadOptions {
    length: Option<u64>,
    parallel_transfer_options: Option<ParallelTransferOptions>,
    headers: Option<BlobHttpHeaders>,
    metadata: Option<BTreeMap<String, String>>,
    tags: Option<BTreeMap<String, String>>,
    tier: Option<AccessTier>,
    request_conditions: Option<BlobRequestConditions>,
    compute_md5: bool,
    timeout: Option<Duration>,
}

impl BlobParallelUploadOptions {
    pub fn new() -> Self {
        BlobParallelUploadOptions::default()
    }

    /// Whether the upload fits in a single Put Blob, given the declared
    /// length and the transfer options.
    pub fn is_single_shot(&self) -> bool {
        let limit = self
            .parallel_transfer_options
            .unwrap_or_default()
            .effective_max_single_upload_size();
        self.length.is_some_and(|length| length <= limit)
    }

    /// Declared length of the data, in bytes.
    pub fn length(&self) -> Option<u64> {
        self.length
    }

    pub fn set_length(&mut self, length: u64) -> &mut Self {
        self.length = Some(length);
        self
    }

    /// Compute an MD5 of each block sent and have the service verify it.
    pub fn compute_md5(&self) -> bool {
        self.compute_md5
    }

    pub fn set_compute_md5(&mut self, value: bool) -> &mut Self {
        self.compute_md5 = value;
        self
    }
}

accessors!(BlobParallelUploadOptions {
    parallel_transfer_options / set_parallel_transfer_options: copy ParallelTransferOptions,
    headers / set_headers: borrow BlobHttpHeaders,
    metadata / set_metadata: borrow BTreeMap<String, String>,
    tags / set_tags: borrow BTreeMap<String, String>,
    tier / set_tier: copy AccessTier,
    request_conditions / set_request_conditions: borrow BlobRequestConditions,
    /// Client-side limit for the whole operation.
    timeout / set_timeout: copy Duration,
});
