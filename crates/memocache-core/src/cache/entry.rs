use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{CacheError, Result, CACHE_VERSION};

/// Envelope written to every cache file
///
/// The format version leads the encoding, followed by the name of the stored
/// type, so both can be checked before the value itself is decoded. bincode
/// carries no type information of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// Schema version for the entry layout
    pub version: u32,

    /// Rust type name of the stored value
    pub type_name: String,

    /// The cached value
    pub value: T,
}

/// Type tag stored alongside values of type `T`
pub fn type_tag<T: ?Sized>() -> &'static str {
    std::any::type_name::<T>()
}

impl<T> CacheEntry<T> {
    /// Wrap a value in an envelope stamped with the current version
    pub fn new(value: T) -> Self {
        Self {
            version: CACHE_VERSION,
            type_name: type_tag::<T>().to_string(),
            value,
        }
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

impl<'a, T> CacheEntry<&'a T> {
    /// Wrap a borrowed value, tagged with the referenced type
    pub fn borrowed(value: &'a T) -> Self {
        Self {
            version: CACHE_VERSION,
            type_name: type_tag::<T>().to_string(),
            value,
        }
    }
}

impl<T: Serialize> CacheEntry<T> {
    /// Serialize to binary format
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(CacheError::from)
    }
}

impl<T: DeserializeOwned> CacheEntry<T> {
    /// Deserialize from binary format, rejecting other format versions and
    /// values stored as another type
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let found: u32 = bincode::deserialize(bytes)?;
        if found != CACHE_VERSION {
            return Err(CacheError::VersionMismatch {
                expected: CACHE_VERSION,
                found,
            });
        }

        let (_, type_name): (u32, String) = bincode::deserialize(bytes)?;
        let expected = type_tag::<T>();
        if type_name != expected {
            return Err(CacheError::TypeMismatch {
                expected: expected.to_string(),
                found: type_name,
            });
        }

        bincode::deserialize(bytes).map_err(CacheError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Profile {
        name: String,
        age: u32,
        tags: Vec<String>,
    }

    #[test]
    fn test_entry_serialization() {
        let profile = Profile {
            name: "Test Case".to_string(),
            age: 42,
            tags: vec!["a".to_string(), "b".to_string()],
        };

        let bytes = CacheEntry::borrowed(&profile).to_bytes().unwrap();
        let decoded = CacheEntry::<Profile>::from_bytes(&bytes).unwrap();

        assert_eq!(decoded.version, CACHE_VERSION);
        assert_eq!(decoded.into_value(), profile);
    }

    #[test]
    fn test_entry_with_map_value() {
        let mut map = BTreeMap::new();
        map.insert("one".to_string(), 1i64);
        map.insert("two".to_string(), 2i64);

        let bytes = CacheEntry::borrowed(&map).to_bytes().unwrap();
        let decoded = CacheEntry::<BTreeMap<String, i64>>::from_bytes(&bytes).unwrap();

        assert_eq!(decoded.value, map);
    }

    #[test]
    fn test_version_mismatch_is_rejected() {
        let stale = CacheEntry {
            version: CACHE_VERSION + 1,
            type_name: type_tag::<String>().to_string(),
            value: "old".to_string(),
        };
        let bytes = stale.to_bytes().unwrap();

        match CacheEntry::<String>::from_bytes(&bytes) {
            Err(CacheError::VersionMismatch { expected, found }) => {
                assert_eq!(expected, CACHE_VERSION);
                assert_eq!(found, CACHE_VERSION + 1);
            }
            other => panic!("expected version mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_other_stored_type_is_rejected() {
        let bytes = CacheEntry::new(1u64).to_bytes().unwrap();

        match CacheEntry::<(u32, u32)>::from_bytes(&bytes) {
            Err(CacheError::TypeMismatch { expected, found }) => {
                assert_eq!(expected, type_tag::<(u32, u32)>());
                assert_eq!(found, type_tag::<u64>());
            }
            other => panic!("expected type mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_borrowed_entry_reads_back_as_owned() {
        let names = vec!["a".to_string()];
        let bytes = CacheEntry::borrowed(&names).to_bytes().unwrap();

        let decoded = CacheEntry::<Vec<String>>::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.type_name, type_tag::<Vec<String>>());
        assert_eq!(decoded.value, names);
    }

    #[test]
    fn test_truncated_bytes_fail_to_decode() {
        let bytes = CacheEntry::new("a fairly long cached string".to_string())
            .to_bytes()
            .unwrap();

        let result = CacheEntry::<String>::from_bytes(&bytes[..bytes.len() - 4]);
        assert!(matches!(result, Err(CacheError::Serialization(_))));
    }
}
