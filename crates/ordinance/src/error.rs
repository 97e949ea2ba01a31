//! Error types for reading and writing ordinance save data.

use std::io;

use crate::resource_key::ResourceKey;

/// Failure while reading or writing a save stream.
///
/// Any error aborts the (de)serialization of the whole ordinance record.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// Underlying I/O failure; a truncated stream surfaces as `UnexpectedEof`.
    #[error("stream I/O error: {0}")]
    Io(#[from] io::Error),

    /// A versioned block carried a version this build does not understand.
    #[error("unsupported {what} version {found} (expected {expected})")]
    UnsupportedVersion {
        /// Which block was being read.
        what: &'static str,
        /// Version this build writes.
        expected: u32,
        /// Version found in the stream.
        found: u32,
    },

    /// A polymorphic list contained a variant tag that is not assigned.
    #[error("unknown {family} variant tag {tag}")]
    UnknownVariant {
        /// Condition or factor family name.
        family: &'static str,
        /// The tag read from the stream.
        tag: u32,
    },

    /// A building type value outside the known enumeration.
    #[error("unknown building type {0}")]
    UnknownBuildingType(u32),

    /// A length-prefixed string was not valid UTF-8.
    #[error("string is not valid UTF-8")]
    InvalidUtf8,

    /// A string too long for its `u32` length prefix.
    #[error("string of {0} bytes does not fit a u32 length prefix")]
    StringTooLong(usize),

    /// A record was read into an ordinance with a different identity.
    #[error("record key {found} does not match ordinance key {expected}")]
    KeyMismatch {
        expected: ResourceKey,
        found: ResourceKey,
    },
}

impl StreamError {
    /// True when the stream ended before the expected data.
    pub fn is_truncated(&self) -> bool {
        matches!(self, StreamError::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
    }
}
