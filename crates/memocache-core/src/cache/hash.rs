use rustc_hash::FxHashMap;
use std::cell::RefCell;

/// Compute the Blake3 digest of a cache key as lower-case hex
///
/// The digest names the entry file on disk, so it must never depend on
/// process state.
pub fn hash_key(key: &str) -> String {
    blake3::hash(key.as_bytes()).to_hex().to_string()
}

/// Memo of key digests so repeated lookups skip rehashing
#[derive(Debug, Default)]
pub struct KeyHasher {
    digests: RefCell<FxHashMap<String, String>>,
}

impl KeyHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Digest for `key`, computed at most once per hasher
    pub fn digest(&self, key: &str) -> String {
        if let Some(digest) = self.digests.borrow().get(key) {
            return digest.clone();
        }

        let digest = hash_key(key);
        self.digests
            .borrow_mut()
            .insert(key.to_string(), digest.clone());
        digest
    }

    pub fn len(&self) -> usize {
        self.digests.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.digests.borrow().is_empty()
    }

    /// Drop every memoized digest
    pub fn forget(&self) {
        self.digests.borrow_mut().clear();
    }
}
