use bevy::prelude::*;
use std::collections::BTreeMap;

use crate::resource_key::StringResourceKey;

/// Looks up localized text.
pub trait StringResources {
    fn localized_string(&self, key: &StringResourceKey) -> Option<String>;
}

/// In-memory localized strings.
#[derive(Resource, Debug, Clone, Default)]
pub struct StringTable {
    entries: BTreeMap<StringResourceKey, String>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: StringResourceKey, text: impl Into<String>) {
        self.entries.insert(key, text.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StringResources for StringTable {
    fn localized_string(&self, key: &StringResourceKey) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

/// Replaces `current` with `localized` if it is non-empty and differs
/// other than by letter case. Returns whether it was replaced.
pub fn apply_localized(current: &mut String, localized: &str) -> bool {
    if localized.is_empty() || localized.to_lowercase() == current.to_lowercase() {
        return false;
    }
    *current = localized.to_string();
    true
}
