use crate::BlobModelError;
use std::fmt;
use std::str::FromStr;

const BYTES_PREFIX: &str = "bytes=";

/// Byte range of a blob: `count` bytes starting at `offset`, or everything
/// from `offset` on when `count` is absent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BlobRange {
    offset: u64,
    count: Option<u64>,
}

impl BlobRange {
    /// Range from `offset` to the end of the blob.
    pub fn from_offset(offset: u64) -> Self {
        BlobRange {
            offset,
            count: None,
        }
    }

    /// Range of `count` bytes. `count` must be at least 1 and the range must
    /// end within `u64`.
    pub fn new(offset: u64, count: Option<u64>) -> Result<Self, BlobModelError> {
        if let Some(count) = count {
            if count == 0 {
                return Err(BlobModelError::OutOfRange {
                    name: "count",
                    constraint: "greater than 0",
                    value: count,
                });
            }
            if offset.checked_add(count - 1).is_none() {
                return Err(BlobModelError::OutOfRange {
                    name: "count",
                    constraint: "small enough that the range ends within u64",
                    value: count,
                });
            }
        }
        Ok(BlobRange { offset, count })
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn count(&self) -> Option<u64> {
        self.count
    }

    /// Inclusive index of the last byte, if bounded.
    pub fn end(&self) -> Option<u64> {
        self.count.map(|count| self.offset + (count - 1))
    }

    /// `bytes=<offset>-` or `bytes=<offset>-<last>`. The whole-blob range
    /// yields `bytes=0-`.
    pub fn to_header_value(&self) -> String {
        match self.end() {
            Some(end) => format!("{BYTES_PREFIX}{}-{end}", self.offset),
            None => format!("{BYTES_PREFIX}{}-", self.offset),
        }
    }
}

impl fmt::Display for BlobRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_header_value())
    }
}

impl FromStr for BlobRange {
    type Err = BlobModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BlobModelError::InvalidRangeHeader(s.to_owned());
        let bounds = s.trim().strip_prefix(BYTES_PREFIX).ok_or_else(invalid)?;
        let (start, end) = bounds.split_once('-').ok_or_else(invalid)?;
        let offset: u64 = start.parse().map_err(|_| invalid())?;
        if end.is_empty() {
            return Ok(BlobRange::from_offset(offset));
        }
        let end: u64 = end.parse().map_err(|_| invalid())?;
        if end < offset {
            return Err(invalid());
        }
        let count = (end - offset).checked_add(1).ok_or_else(invalid)?;
        BlobRange::new(offset, Some(count))
    }
}
