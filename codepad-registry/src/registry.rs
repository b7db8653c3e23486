//! Generic ordered registry keyed by a static id.

use indexmap::IndexMap;
use thiserror::Error;

use codepad_api::{LanguageConfig, ThemeConfig};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    #[error("unknown theme: {0}")]
    UnknownTheme(String),

    #[error("duplicate registry id: {0}")]
    DuplicateId(String),

    #[error("registry is empty")]
    Empty,
}

/// Something that can live in a [`Registry`].
pub trait Entry {
    fn id(&self) -> &'static str;

    /// Error reported when `id` is not present.
    fn unknown(id: &str) -> RegistryError;
}

impl Entry for LanguageConfig {
    fn id(&self) -> &'static str {
        self.id
    }

    fn unknown(id: &str) -> RegistryError {
        RegistryError::UnknownLanguage(id.to_string())
    }
}

impl Entry for ThemeConfig {
    fn id(&self) -> &'static str {
        self.id
    }

    fn unknown(id: &str) -> RegistryError {
        RegistryError::UnknownTheme(id.to_string())
    }
}

/// Immutable lookup table. Insertion order is display order and the first
/// entry is the default.
#[derive(Debug, Clone)]
pub struct Registry<T> {
    entries: IndexMap<&'static str, T>,
}

impl<T: Entry> Registry<T> {
    /// Build a registry, rejecting duplicate ids and empty tables.
    pub fn new(entries: impl IntoIterator<Item = T>) -> Result<Self, RegistryError> {
        let mut map = IndexMap::new();
        for entry in entries {
            let id = entry.id();
            if map.insert(id, entry).is_some() {
                return Err(RegistryError::DuplicateId(id.to_string()));
            }
        }
        if map.is_empty() {
            return Err(RegistryError::Empty);
        }
        Ok(Self { entries: map })
    }

    /// Build a registry from a built-in table known to be unique and non-empty.
    pub(crate) fn from_static(entries: Vec<T>) -> Self {
        let map: IndexMap<_, _> = entries.into_iter().map(|e| (e.id(), e)).collect();
        debug_assert!(!map.is_empty(), "built-in registry must not be empty");
        Self { entries: map }
    }

    /// Look up an entry, failing on unknown ids.
    pub fn get(&self, id: &str) -> Result<&T, RegistryError> {
        self.entries.get(id).ok_or_else(|| T::unknown(id))
    }

    /// Look up an entry, returning `None` on unknown ids.
    pub fn find(&self, id: &str) -> Option<&T> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// All entries in display order.
    pub fn list(&self) -> impl ExactSizeIterator<Item = &T> {
        self.entries.values()
    }

    pub fn ids(&self) -> impl ExactSizeIterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The first registered entry.
    pub fn default_entry(&self) -> &T {
        // Construction guarantees at least one entry.
        &self.entries[0]
    }

    /// Total lookup: unknown ids resolve to the default entry.
    pub fn get_or_default(&self, id: &str) -> &T {
        match self.entries.get(id) {
            Some(entry) => entry,
            None => {
                let fallback = self.default_entry().id();
                tracing::warn!("Unknown registry id {:?}, using {:?}", id, fallback);
                self.default_entry()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Dummy(&'static str);

    impl Entry for Dummy {
        fn id(&self) -> &'static str {
            self.0
        }

        fn unknown(id: &str) -> RegistryError {
            RegistryError::UnknownLanguage(id.to_string())
        }
    }

    #[test]
    fn test_registry_preserves_insertion_order() {
        let registry = Registry::new([Dummy("b"), Dummy("a"), Dummy("c")]).unwrap();
        let ids: Vec<_> = registry.ids().collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
        assert_eq!(registry.default_entry(), &Dummy("b"));
    }

    #[test]
    fn test_registry_rejects_duplicates() {
        let err = Registry::new([Dummy("a"), Dummy("a")]).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateId("a".to_string()));
    }

    #[test]
    fn test_registry_rejects_empty() {
        let err = Registry::<Dummy>::new([]).unwrap_err();
        assert_eq!(err, RegistryError::Empty);
    }

    #[test]
    fn test_registry_get_unknown() {
        let registry = Registry::new([Dummy("a")]).unwrap();
        assert!(registry.get("zzz").is_err());
        assert!(registry.find("zzz").is_none());
        assert!(!registry.contains("zzz"));
    }

    #[test]
    fn test_registry_get_or_default_falls_back() {
        let registry = Registry::new([Dummy("a"), Dummy("b")]).unwrap();
        assert_eq!(registry.get_or_default("b"), &Dummy("b"));
        assert_eq!(registry.get_or_default("missing"), &Dummy("a"));
    }
}
