//! Persistence shared by the condition and income-factor families.
//!
//! Both families are written as `u32 count` followed by `count` entries of
//! `u32 variant tag` + variant payload.

use std::io::{Read, Write};

use crate::error::StreamError;
use crate::stream::{SaveRead, SaveWrite};

/// A closed family of persisted rule variants.
pub trait PersistedRule: Sized {
    /// Family name used in error messages.
    const FAMILY: &'static str;

    /// Stable tag written before the payload.
    fn tag(&self) -> u32;

    fn write_payload(&self, writer: &mut dyn Write) -> Result<(), StreamError>;

    /// Reads the payload of the variant identified by `tag`.
    fn read_payload(tag: u32, reader: &mut dyn Read) -> Result<Self, StreamError>;
}

pub fn write_rule_list<T: PersistedRule>(
    writer: &mut dyn Write,
    rules: &[T],
) -> Result<(), StreamError> {
    let count = u32::try_from(rules.len()).map_err(|_| {
        StreamError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("too many {} entries: {}", T::FAMILY, rules.len()),
        ))
    })?;
    writer.write_u32_le(count)?;
    for rule in rules {
        writer.write_u32_le(rule.tag())?;
        rule.write_payload(writer)?;
    }
    Ok(())
}

pub fn read_rule_list<T: PersistedRule>(reader: &mut dyn Read) -> Result<Vec<T>, StreamError> {
    let count = reader.read_u32_le()?;
    // The count comes from the stream; grow as entries arrive instead of trusting it.
    let mut rules = Vec::new();
    for _ in 0..count {
        let tag = reader.read_u32_le()?;
        rules.push(T::read_payload(tag, reader)?);
    }
    Ok(rules)
}
