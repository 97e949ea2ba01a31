// ---------------------------------------------------------------------------
// stream – little-endian primitives for the ordinance save format
// ---------------------------------------------------------------------------
//
// Integers and floats are little-endian. Strings are a u32 byte length followed
// by UTF-8 bytes (no terminator). Booleans are a single byte, nonzero = true.

use std::io::{Read, Write};

use crate::error::StreamError;
use crate::resource_key::{ResourceKey, StringResourceKey};

/// Typed reads over any byte source.
pub trait SaveRead: Read {
    fn read_u32_le(&mut self) -> Result<u32, StreamError> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    fn read_i32_le(&mut self) -> Result<i32, StreamError> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)?;
        Ok(i32::from_le_bytes(buf))
    }

    fn read_i64_le(&mut self) -> Result<i64, StreamError> {
        let mut buf = [0u8; 8];
        self.read_exact(&mut buf)?;
        Ok(i64::from_le_bytes(buf))
    }

    fn read_f32_le(&mut self) -> Result<f32, StreamError> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)?;
        Ok(f32::from_le_bytes(buf))
    }

    fn read_bool(&mut self) -> Result<bool, StreamError> {
        let mut buf = [0u8; 1];
        self.read_exact(&mut buf)?;
        Ok(buf[0] != 0)
    }

    fn read_string(&mut self) -> Result<String, StreamError> {
        let len = self.read_u32_le()? as usize;
        let mut bytes = Vec::new();
        // `take` keeps a corrupt length from allocating more than the stream holds.
        let read = (&mut *self).take(len as u64).read_to_end(&mut bytes)?;
        if read != len {
            return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
        }
        String::from_utf8(bytes).map_err(|_| StreamError::InvalidUtf8)
    }

    fn read_resource_key(&mut self) -> Result<ResourceKey, StreamError> {
        let type_id = self.read_u32_le()?;
        let group = self.read_u32_le()?;
        let instance = self.read_u32_le()?;
        Ok(ResourceKey::new(type_id, group, instance))
    }

    fn read_string_key(&mut self) -> Result<StringResourceKey, StreamError> {
        let group = self.read_u32_le()?;
        let instance = self.read_u32_le()?;
        Ok(StringResourceKey::new(group, instance))
    }

    /// Reads a version field and rejects anything but `expected`.
    fn expect_version(&mut self, what: &'static str, expected: u32) -> Result<(), StreamError> {
        let found = self.read_u32_le()?;
        if found != expected {
            return Err(StreamError::UnsupportedVersion {
                what,
                expected,
                found,
            });
        }
        Ok(())
    }
}

impl<R: Read + ?Sized> SaveRead for R {}

/// Typed writes over any byte sink.
pub trait SaveWrite: Write {
    fn write_u32_le(&mut self, value: u32) -> Result<(), StreamError> {
        self.write_all(&value.to_le_bytes())?;
        Ok(())
    }

    fn write_i32_le(&mut self, value: i32) -> Result<(), StreamError> {
        self.write_all(&value.to_le_bytes())?;
        Ok(())
    }

    fn write_i64_le(&mut self, value: i64) -> Result<(), StreamError> {
        self.write_all(&value.to_le_bytes())?;
        Ok(())
    }

    fn write_f32_le(&mut self, value: f32) -> Result<(), StreamError> {
        self.write_all(&value.to_le_bytes())?;
        Ok(())
    }

    fn write_bool(&mut self, value: bool) -> Result<(), StreamError> {
        self.write_all(&[u8::from(value)])?;
        Ok(())
    }

    fn write_string(&mut self, value: &str) -> Result<(), StreamError> {
        let len = u32::try_from(value.len()).map_err(|_| StreamError::StringTooLong(value.len()))?;
        self.write_u32_le(len)?;
        self.write_all(value.as_bytes())?;
        Ok(())
    }

    fn write_resource_key(&mut self, key: &ResourceKey) -> Result<(), StreamError> {
        self.write_u32_le(key.type_id)?;
        self.write_u32_le(key.group)?;
        self.write_u32_le(key.instance)
    }

    fn write_string_key(&mut self, key: &StringResourceKey) -> Result<(), StreamError> {
        self.write_u32_le(key.group)?;
        self.write_u32_le(key.instance)
    }
}

impl<W: Write + ?Sized> SaveWrite for W {}
