//! Value objects and option bags for the Azure Blob Storage REST API.
//!
//! Every model is a plain data holder: optional fields are read through
//! getters returning `Option` and written through chainable `set_*`
//! setters, which store the value unchanged. Arguments with a valid range
//! are checked by their setter and rejected with [`BlobModelError`].
//!
//! ```
//! use azure_storage_blob_models::{AccessTier, BlobHttpHeaders, BlobParallelUploadOptions};
//!
//! let mut headers = BlobHttpHeaders::new();
//! headers.set_content_type("text/plain").set_cache_control("no-cache");
//!
//! let mut options = BlobParallelUploadOptions::new();
//! options.set_headers(headers).set_tier(AccessTier::Cool);
//! assert_eq!(options.tier(), Some(AccessTier::Cool));
//! assert_eq!("Cool".parse::<AccessTier>().unwrap(), AccessTier::Cool);
//! ```
#![warn(missing_debug_implementations)]

#[macro_use]
mod macros;

mod base64_opt;
mod conditions;
mod container;
mod enums;
mod error;
mod headers;
mod options;
mod properties;
mod range;

pub use conditions::BlobRequestConditions;
pub use container::{BlobContainerItem, BlobContainerProperties};
pub use enums::{
    AccessTier, ArchiveStatus, BlobType, CopyStatusType, LeaseDurationType, LeaseStateType,
    LeaseStatusType, PublicAccessType, RehydratePriority,
};
pub use error::BlobModelError;
pub use headers::BlobHttpHeaders;
pub use options::{
    BlobDownloadToFileOptions, BlobListDetails, BlobParallelUploadOptions, ListBlobsOptions,
    ParallelTransferOptions, MAX_LIST_RESULTS, MAX_STAGE_BLOCK_BYTES, MAX_UPLOAD_BLOB_BYTES,
};
pub use properties::{BlobItem, BlobItemProperties, BlobProperties};
pub use range::BlobRange;
