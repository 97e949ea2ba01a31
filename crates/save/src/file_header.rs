// ---------------------------------------------------------------------------
// file_header – Ordinance segment header with magic bytes, version, checksum
// ---------------------------------------------------------------------------
//
// Header format (24 bytes, fixed-size, little-endian):
//   [0..4]   Magic bytes: "ORDN"
//   [4..8]   Format version (u32)
//   [8..12]  Flags (u32: bit 0 = LZ4-compressed payload)
//   [12..16] Number of ordinance records (u32)
//   [16..20] Uncompressed payload size (u32)
//   [20..24] xxHash32 checksum of the stored payload (everything after the header)
//
// On save: encode records -> optionally compress -> prepend header
// On load: check magic -> check version -> validate checksum -> strip header

use xxhash_rust::xxh32::xxh32;

use crate::save_error::SaveError;

/// Magic bytes identifying an ordinance segment.
pub const MAGIC: [u8; 4] = *b"ORDN";

/// Size of the segment header in bytes.
pub const HEADER_SIZE: usize = 24;

/// Current segment format version.
pub const SEGMENT_FORMAT_VERSION: u32 = 1;

/// Flag bit set when the payload is LZ4-compressed.
pub const FLAG_COMPRESSED: u32 = 1;

/// Seed for xxHash32 checksum.
const XXHASH_SEED: u32 = 0;

/// Parsed segment header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentHeader {
    pub format_version: u32,
    pub flags: u32,
    pub record_count: u32,
    pub uncompressed_size: u32,
    pub checksum: u32,
}

impl SegmentHeader {
    /// Header for `stored` payload bytes.
    pub fn new(stored: &[u8], record_count: u32, uncompressed_size: u32, compressed: bool) -> Self {
        Self {
            format_version: SEGMENT_FORMAT_VERSION,
            flags: if compressed { FLAG_COMPRESSED } else { 0 },
            record_count,
            uncompressed_size,
            checksum: xxh32(stored, XXHASH_SEED),
        }
    }

    pub fn is_compressed(&self) -> bool {
        self.flags & FLAG_COMPRESSED != 0
    }

    fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0..4].copy_from_slice(&MAGIC);
        out[4..8].copy_from_slice(&self.format_version.to_le_bytes());
        out[8..12].copy_from_slice(&self.flags.to_le_bytes());
        out[12..16].copy_from_slice(&self.record_count.to_le_bytes());
        out[16..20].copy_from_slice(&self.uncompressed_size.to_le_bytes());
        out[20..24].copy_from_slice(&self.checksum.to_le_bytes());
        out
    }
}

fn le_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// Prepends `header` to the stored payload.
pub fn wrap_with_header(header: &SegmentHeader, stored: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_SIZE + stored.len());
    out.extend_from_slice(&header.to_bytes());
    out.extend_from_slice(stored);
    out
}

/// Parses and validates the segment header.
///
/// Returns the header and the stored payload that follows it.
///
/// # Errors
///
/// - the buffer does not start with "ORDN" or is shorter than the header
/// - the format version is from a newer build
/// - the checksum does not match the stored payload
pub fn unwrap_header(bytes: &[u8]) -> Result<(SegmentHeader, &[u8]), SaveError> {
    if bytes.len() < MAGIC.len() || bytes[..4] != MAGIC {
        return Err(SaveError::Decode(
            "Segment does not start with ORDN magic bytes".to_string(),
        ));
    }
    if bytes.len() < HEADER_SIZE {
        return Err(SaveError::Decode(format!(
            "Segment is too short ({} bytes, need at least {} for header)",
            bytes.len(),
            HEADER_SIZE
        )));
    }

    let header = SegmentHeader {
        format_version: le_u32(bytes, 4),
        flags: le_u32(bytes, 8),
        record_count: le_u32(bytes, 12),
        uncompressed_size: le_u32(bytes, 16),
        checksum: le_u32(bytes, 20),
    };

    if header.format_version > SEGMENT_FORMAT_VERSION {
        return Err(SaveError::VersionMismatch {
            expected_max: SEGMENT_FORMAT_VERSION,
            found: header.format_version,
        });
    }

    let payload = &bytes[HEADER_SIZE..];
    let computed = xxh32(payload, XXHASH_SEED);
    if computed != header.checksum {
        return Err(SaveError::Corrupted {
            expected: header.checksum,
            computed,
        });
    }

    Ok((header, payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrapped(data: &[u8]) -> Vec<u8> {
        let header = SegmentHeader::new(data, 3, data.len() as u32, false);
        wrap_with_header(&header, data)
    }

    #[test]
    fn test_header_layout() {
        let data = b"payload";
        let bytes = wrapped(data);
        assert_eq!(&bytes[..4], b"ORDN");
        assert_eq!(bytes.len(), HEADER_SIZE + data.len());
        assert_eq!(le_u32(&bytes, 4), SEGMENT_FORMAT_VERSION);
        assert_eq!(le_u32(&bytes, 8), 0);
        assert_eq!(le_u32(&bytes, 12), 3);
        assert_eq!(le_u32(&bytes, 16), data.len() as u32);
        assert_eq!(le_u32(&bytes, 20), xxh32(data, XXHASH_SEED));
    }

    #[test]
    fn test_wrap_and_unwrap() {
        let data = b"hello ordinances";
        let bytes = wrapped(data);
        let (header, payload) = unwrap_header(&bytes).expect("unwrap should succeed");
        assert_eq!(header.record_count, 3);
        assert!(!header.is_compressed());
        assert_eq!(payload, data);
    }

    #[test]
    fn test_compressed_flag() {
        let header = SegmentHeader::new(b"x", 1, 10, true);
        assert!(header.is_compressed());
        assert_eq!(header.flags, FLAG_COMPRESSED);
    }

    #[test]
    fn test_bad_magic_rejected() {
        let mut bytes = wrapped(b"data");
        bytes[0] = b'X';
        let err = unwrap_header(&bytes).unwrap_err();
        assert!(matches!(err, SaveError::Decode(ref m) if m.contains("magic")), "got: {err}");
        assert!(unwrap_header(b"").is_err());
    }

    #[test]
    fn test_truncated_header_detected() {
        let err = unwrap_header(b"ORDN\x01\x00").unwrap_err();
        assert!(matches!(err, SaveError::Decode(ref m) if m.contains("too short")), "got: {err}");
    }

    #[test]
    fn test_future_version_rejected() {
        let mut bytes = wrapped(b"data");
        bytes[4..8].copy_from_slice(&999u32.to_le_bytes());
        match unwrap_header(&bytes) {
            Err(SaveError::VersionMismatch {
                expected_max,
                found,
            }) => {
                assert_eq!(expected_max, SEGMENT_FORMAT_VERSION);
                assert_eq!(found, 999);
            }
            other => panic!("expected VersionMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_corrupted_payload_detected() {
        let mut bytes = wrapped(b"test payload");
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;
        assert!(matches!(
            unwrap_header(&bytes),
            Err(SaveError::Corrupted { .. })
        ));
    }

    #[test]
    fn test_empty_payload() {
        let bytes = wrapped(b"");
        assert_eq!(bytes.len(), HEADER_SIZE);
        let (header, payload) = unwrap_header(&bytes).expect("unwrap should succeed");
        assert_eq!(header.uncompressed_size, 0);
        assert!(payload.is_empty());
    }
}
