use thiserror::Error;

/// Rejected argument or wire value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BlobModelError {
    /// A string that is not one of the enum's wire forms.
    #[error("'{value}' is not a valid {kind}")]
    UnknownValue { kind: &'static str, value: String },

    /// A numeric argument outside its allowed range.
    #[error("{name} must be {constraint}, got {value}")]
    OutOfRange {
        name: &'static str,
        constraint: &'static str,
        value: u64,
    },

    /// A `Range`/`x-ms-range` header that cannot be parsed.
    #[error("invalid range header: {0}")]
    InvalidRangeHeader(String),
}
