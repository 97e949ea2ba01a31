//! Binary record of a single ordinance.
//!
//! ```text
//! u32 version (1)
//! ResourceKey key
//! condition list, factor list
//! string name, StringResourceKey name key
//! string description, StringResourceKey description key
//! i64 enactment, i64 retraction, i64 retraction, i64 constant, i64 adjusted
//! bool is income
//! property holder
//! bool available, bool on, bool enabled
//! ```
//!
//! The retraction income appears twice. Existing save data carries the
//! duplicate, so it stays on the wire; the second copy wins on read.

use std::io::{Read, Write};

use super::record::{HostResources, Ordinance};
use crate::config::ORDINANCE_RECORD_VERSION;
use crate::definition::PropertyHolder;
use crate::error::StreamError;
use crate::rules::{read_rule_list, write_rule_list};
use crate::stream::{SaveRead, SaveWrite};

impl Ordinance {
    pub fn write(&self, writer: &mut dyn Write) -> Result<(), StreamError> {
        writer.write_u32_le(ORDINANCE_RECORD_VERSION)?;
        writer.write_resource_key(&self.key())?;
        write_rule_list(writer, &self.conditions)?;
        write_rule_list(writer, &self.factors)?;
        writer.write_string(&self.name)?;
        writer.write_string_key(&self.name_key)?;
        writer.write_string(&self.description)?;
        writer.write_string_key(&self.description_key)?;
        writer.write_i64_le(self.enactment_income)?;
        writer.write_i64_le(self.retraction_income)?;
        writer.write_i64_le(self.retraction_income)?;
        writer.write_i64_le(self.monthly_constant_income)?;
        writer.write_i64_le(self.monthly_adjusted_income)?;
        writer.write_bool(self.is_income)?;
        self.properties.write(writer)?;
        writer.write_bool(self.available)?;
        writer.write_bool(self.on)?;
        writer.write_bool(self.enabled)?;
        Ok(())
    }

    /// Restores a whole ordinance from `reader`.
    ///
    /// The result is marked as restored, so a following `init` keeps it.
    pub fn read_new(reader: &mut dyn Read, host: &HostResources<'_>) -> Result<Self, StreamError> {
        reader.expect_version("ordinance record", ORDINANCE_RECORD_VERSION)?;
        let key = reader.read_resource_key()?;
        let mut ordinance = Ordinance::new(key);

        ordinance.conditions = read_rule_list(reader)?;
        ordinance.factors = read_rule_list(reader)?;
        ordinance.name = reader.read_string()?;
        ordinance.name_key = reader.read_string_key()?;
        ordinance.description = reader.read_string()?;
        ordinance.description_key = reader.read_string_key()?;
        ordinance.enactment_income = reader.read_i64_le()?;
        ordinance.retraction_income = reader.read_i64_le()?;
        ordinance.retraction_income = reader.read_i64_le()?;
        ordinance.monthly_constant_income = reader.read_i64_le()?;
        ordinance.monthly_adjusted_income = reader.read_i64_le()?;
        ordinance.is_income = reader.read_bool()?;
        ordinance.properties = PropertyHolder::read(reader, host.definitions)?;
        ordinance.available = reader.read_bool()?;
        ordinance.on = reader.read_bool()?;
        ordinance.enabled = reader.read_bool()?;

        ordinance.restored = true;
        ordinance.load_localized_strings(host.strings);
        Ok(ordinance)
    }

    /// Replaces this ordinance's state with the record in `reader`.
    ///
    /// The record must carry this ordinance's key. On any error `self` is
    /// left untouched.
    pub fn read(&mut self, reader: &mut dyn Read, host: &HostResources<'_>) -> Result<(), StreamError> {
        let restored = Self::read_new(reader, host)?;
        if restored.key() != self.key() {
            return Err(StreamError::KeyMismatch {
                expected: self.key(),
                found: restored.key(),
            });
        }
        *self = restored;
        Ok(())
    }
}
