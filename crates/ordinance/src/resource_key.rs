use serde::{Deserialize, Serialize};
use std::fmt;

/// 96-bit key of a definition record: type, group and instance ids.
///
/// The instance id doubles as the ordinance class id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceKey {
    #[serde(rename = "type")]
    pub type_id: u32,
    pub group: u32,
    pub instance: u32,
}

impl ResourceKey {
    pub const fn new(type_id: u32, group: u32, instance: u32) -> Self {
        Self {
            type_id,
            group,
            instance,
        }
    }

    /// The all-zero key, persisted to mean "no record".
    pub const fn none() -> Self {
        Self::new(0, 0, 0)
    }

    pub fn is_none(&self) -> bool {
        *self == Self::none()
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "0x{:08x}, 0x{:08x}, 0x{:08x}",
            self.type_id, self.group, self.instance
        )
    }
}

/// Reference to a localized string: group and instance id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StringResourceKey {
    pub group: u32,
    pub instance: u32,
}

impl StringResourceKey {
    pub const fn new(group: u32, instance: u32) -> Self {
        Self { group, instance }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_hex_triplet() {
        let key = ResourceKey::new(0x6534284A, 0x4A8F8A63, 0xDEADBEEF);
        assert_eq!(key.to_string(), "0x6534284a, 0x4a8f8a63, 0xdeadbeef");
    }

    #[test]
    fn test_none_key() {
        assert!(ResourceKey::none().is_none());
        assert!(!ResourceKey::new(0, 0, 1).is_none());
    }

    #[test]
    fn test_json_field_names() {
        let key: ResourceKey =
            serde_json::from_str(r#"{ "type": 1, "group": 2, "instance": 3 }"#).unwrap();
        assert_eq!(key, ResourceKey::new(1, 2, 3));
    }
}
