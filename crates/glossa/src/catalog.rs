//! Per-locale message storage.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::CatalogWarning;
use crate::types::Message;

/// A store of message keys to message entries for one locale.
///
/// A catalog is populated by a loader before use and is additionally written
/// to by its translator, which memoizes entries found in a fallback catalog.
/// Because that write happens during `translate(&self, ..)`, the mapping sits
/// behind an `RwLock`: lookups share a read lock, inserts take the write lock.
/// A poisoned lock is recovered rather than propagated, so lookups never
/// panic.
///
/// # Example
///
/// ```
/// use glossa::{Catalog, Message};
///
/// let catalog = Catalog::new();
/// catalog.add_message("greeting", "Bonjour");
///
/// assert_eq!(catalog.get_message("greeting"), Some(Message::from("Bonjour")));
/// assert_eq!(catalog.get_message("farewell"), None);
/// ```
#[derive(Debug, Default)]
pub struct Catalog {
    messages: RwLock<HashMap<String, Message>>,
}

impl Catalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an entry by key, without any fallback.
    ///
    /// Returns a copy of the entry so no lock is held by the caller.
    pub fn get_message(&self, key: &str) -> Option<Message> {
        self.read().get(key).cloned()
    }

    /// Insert an entry, replacing any existing entry for the key.
    pub fn add_message(&self, key: impl Into<String>, message: impl Into<Message>) {
        self.write().insert(key.into(), message.into());
    }

    /// Insert many entries at once.
    pub fn add_messages<K, M>(&self, messages: impl IntoIterator<Item = (K, M)>)
    where
        K: Into<String>,
        M: Into<Message>,
    {
        let mut guard = self.write();
        for (key, message) in messages {
            guard.insert(key.into(), message.into());
        }
    }

    /// Check whether the catalog holds an entry for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// All keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Audit this catalog, a translation for `locale`, against `source`.
    ///
    /// Checks for:
    /// - Keys defined here that the source does not define
    /// - Keys whose entry shape (text, plural, context) differs from the source
    /// - Entries with nothing displayable
    ///
    /// Keys missing from this catalog are not reported; those resolve through
    /// the fallback chain. Warnings are ordered by key.
    pub fn validate_against(&self, source: &Catalog, locale: &str) -> Vec<CatalogWarning> {
        let mut warnings = Vec::new();

        for key in self.keys() {
            let Some(message) = self.get_message(&key) else {
                continue;
            };

            if message.is_empty() {
                warnings.push(CatalogWarning::EmptyMessage {
                    key: key.clone(),
                    locale: locale.to_string(),
                });
            }

            match source.get_message(&key) {
                Some(expected) if expected.shape() != message.shape() => {
                    warnings.push(CatalogWarning::ShapeMismatch {
                        key,
                        locale: locale.to_string(),
                        expected: expected.shape(),
                        found: message.shape(),
                    });
                }
                Some(_) => {}
                None => warnings.push(CatalogWarning::UnknownKey {
                    key,
                    locale: locale.to_string(),
                }),
            }
        }

        warnings
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Message>> {
        self.messages.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Message>> {
        self.messages.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clone for Catalog {
    fn clone(&self) -> Self {
        Self {
            messages: RwLock::new(self.read().clone()),
        }
    }
}

impl<K: Into<String>, M: Into<Message>> FromIterator<(K, M)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (K, M)>>(iter: I) -> Self {
        let catalog = Catalog::new();
        catalog.add_messages(iter);
        catalog
    }
}
