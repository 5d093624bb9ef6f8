//! Secret lookup port
//!
//! Defines how the resolution engine reads the `$secret` namespace.

use std::collections::{BTreeMap, HashMap};

/// Synchronous, side-effect free access to secret values.
///
/// The engine calls this inline while walking references, so
/// implementations should answer from memory or a short-lived cache.
pub trait SecretLookup {
    /// Returns the secret stored at `path`, or `None` if there is none.
    fn try_get(&self, path: &str) -> Option<String>;
}

/// A secret source that never has any secrets.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSecrets;

impl SecretLookup for NoSecrets {
    fn try_get(&self, _path: &str) -> Option<String> {
        None
    }
}

impl<T: SecretLookup + ?Sized> SecretLookup for &T {
    fn try_get(&self, path: &str) -> Option<String> {
        (**self).try_get(path)
    }
}

impl SecretLookup for HashMap<String, String> {
    fn try_get(&self, path: &str) -> Option<String> {
        self.get(path).cloned()
    }
}

impl SecretLookup for BTreeMap<String, String> {
    fn try_get(&self, path: &str) -> Option<String> {
        self.get(path).cloned()
    }
}
