//! Encoding of the ordinance collection into a framed segment.
//!
//! Payload layout, repeated once per ordinance:
//!
//! ```text
//! u32 class id
//! ordinance record
//! ```

use std::borrow::Cow;

use ordinance::stream::{SaveRead, SaveWrite};
use ordinance::{HostResources, Ordinance};

use crate::file_header::{unwrap_header, wrap_with_header, SegmentHeader};
use crate::save_error::SaveError;

/// Upper bound of the LZ4 block format's expansion ratio.
const MAX_LZ4_RATIO: usize = 255;

fn to_u32(value: usize, what: &str) -> Result<u32, SaveError> {
    u32::try_from(value)
        .map_err(|_| SaveError::Decode(format!("{what} {value} does not fit the segment header")))
}

/// Writes every ordinance into a segment, LZ4-compressing the payload when
/// `compress` is set.
pub fn encode_ordinances<'a>(
    ordinances: impl IntoIterator<Item = &'a Ordinance>,
    compress: bool,
) -> Result<Vec<u8>, SaveError> {
    let mut payload = Vec::new();
    let mut count = 0usize;
    for ordinance in ordinances {
        payload.write_u32_le(ordinance.id())?;
        ordinance.write(&mut payload)?;
        count += 1;
    }

    let record_count = to_u32(count, "record count")?;
    let uncompressed_size = to_u32(payload.len(), "payload size")?;
    let stored = if compress {
        lz4_flex::block::compress(&payload)
    } else {
        payload
    };

    let header = SegmentHeader::new(&stored, record_count, uncompressed_size, compress);
    Ok(wrap_with_header(&header, &stored))
}

/// Reads every ordinance from a segment.
///
/// Any failure aborts the whole decode; nothing partial is returned.
/// Decoded ordinances are marked restored.
pub fn decode_ordinances(
    bytes: &[u8],
    host: &HostResources<'_>,
) -> Result<Vec<Ordinance>, SaveError> {
    let (header, stored) = unwrap_header(bytes)?;

    let payload = if header.is_compressed() {
        let limit = stored.len().saturating_mul(MAX_LZ4_RATIO);
        if header.uncompressed_size as usize > limit {
            return Err(SaveError::Decode(format!(
                "Uncompressed size {} exceeds what {} stored byte(s) can expand to",
                header.uncompressed_size,
                stored.len()
            )));
        }
        Cow::Owned(lz4_flex::block::decompress(
            stored,
            header.uncompressed_size as usize,
        )?)
    } else {
        Cow::Borrowed(stored)
    };
    if payload.len() != header.uncompressed_size as usize {
        return Err(SaveError::Decode(format!(
            "Payload is {} bytes, header says {}",
            payload.len(),
            header.uncompressed_size
        )));
    }

    let mut reader: &[u8] = &payload;
    let mut ordinances = Vec::new();
    for _ in 0..header.record_count {
        let class_id = reader.read_u32_le()?;
        let ordinance = Ordinance::read_new(&mut reader, host)?;
        if ordinance.id() != class_id {
            return Err(SaveError::Decode(format!(
                "Record for class 0x{class_id:08x} holds ordinance {}",
                ordinance.key()
            )));
        }
        ordinances.push(ordinance);
    }

    if !reader.is_empty() {
        return Err(SaveError::Decode(format!(
            "{} trailing byte(s) after {} record(s)",
            reader.len(),
            header.record_count
        )));
    }

    Ok(ordinances)
}
