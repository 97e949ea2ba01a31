//! Failures of the ordinance save segment, from file I/O up to record decoding.

use std::fmt;

use ordinance::StreamError;

/// Errors that can occur while saving or loading the ordinance segment.
#[derive(Debug)]
pub enum SaveError {
    /// I/O error while reading or writing the segment file.
    Io(std::io::Error),
    /// An ordinance record failed to (de)serialize.
    Stream(StreamError),
    /// The segment is structurally invalid (bad magic, short header, wrong
    /// record class, trailing bytes, failed decompression).
    Decode(String),
    /// Segment format version is newer than this build supports.
    VersionMismatch { expected_max: u32, found: u32 },
    /// Stored checksum does not match the payload.
    Corrupted { expected: u32, computed: u32 },
    /// No segment bytes were available to load.
    NoData,
    /// A required resource was missing from the ECS world.
    MissingResource(String),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "I/O error: {e}"),
            SaveError::Stream(e) => write!(f, "Ordinance record error: {e}"),
            SaveError::Decode(msg) => write!(f, "Decoding error: {msg}"),
            SaveError::VersionMismatch {
                expected_max,
                found,
            } => write!(
                f,
                "Version mismatch: segment is v{found}, but this build only supports up to v{expected_max}"
            ),
            SaveError::Corrupted { expected, computed } => write!(
                f,
                "Segment is corrupted: checksum mismatch (expected {expected:#010X}, got {computed:#010X})"
            ),
            SaveError::NoData => write!(f, "No ordinance save data available to load"),
            SaveError::MissingResource(name) => {
                write!(f, "Missing required resource: {name}")
            }
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Io(e) => Some(e),
            SaveError::Stream(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<StreamError> for SaveError {
    fn from(e: StreamError) -> Self {
        SaveError::Stream(e)
    }
}

impl From<lz4_flex::block::DecompressError> for SaveError {
    fn from(e: lz4_flex::block::DecompressError) -> Self {
        SaveError::Decode(format!("LZ4 decompression failed: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_messages_name_the_failure() {
        let cases = [
            (
                SaveError::VersionMismatch {
                    expected_max: 1,
                    found: 4,
                },
                "segment is v4",
            ),
            (
                SaveError::Corrupted {
                    expected: 0xDEADBEEF,
                    computed: 0x1,
                },
                "expected 0xDEADBEEF",
            ),
            (
                SaveError::Decode("trailing bytes".to_string()),
                "trailing bytes",
            ),
            (
                SaveError::MissingResource("OrdinanceSimulator".to_string()),
                "OrdinanceSimulator",
            ),
            (SaveError::NoData, "No ordinance save data"),
        ];
        for (err, fragment) in cases {
            let msg = err.to_string();
            assert!(msg.contains(fragment), "{fragment:?} missing from: {msg}");
        }
    }

    #[test]
    fn test_record_failures_keep_their_cause() {
        let err = SaveError::from(StreamError::UnknownBuildingType(9));
        assert!(matches!(err, SaveError::Stream(StreamError::UnknownBuildingType(9))));
        let cause = err.source().map(ToString::to_string).unwrap_or_default();
        assert_eq!(cause, "unknown building type 9");
    }

    #[test]
    fn test_file_failures_keep_their_cause() {
        let err = SaveError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "segment file is read-only",
        ));
        assert!(err.to_string().starts_with("I/O error"));
        assert!(err.source().is_some());
        assert!(SaveError::NoData.source().is_none());
    }
}
