//! Disk-backed key/value cache
//!
//! Every key is hashed to a fixed-length digest which names the file holding
//! the serialized value. The filesystem is the only source of truth; the
//! in-memory state is limited to a memo of key digests.

mod entry;
mod error;
mod hash;
mod repository;

pub use entry::CacheEntry;
pub use error::{CacheError, Result};
pub use hash::{hash_key, KeyHasher};
pub use repository::CacheRepository;

/// Cache format version - increment when the entry layout changes
pub const CACHE_VERSION: u32 = 1;

/// Default cache directory name
pub const DEFAULT_CACHE_DIR: &str = ".cache";
