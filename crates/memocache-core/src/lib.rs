//! File-backed memoization.
//!
//! [`CacheRepository`] stores serializable values as one file per key under
//! `<base>/<directory>/<digest>`. [`CacheProxy`] wraps any value and routes
//! its method calls through the repository, keyed by method name and
//! arguments.

pub mod cache;
pub mod config;
pub mod proxy;

pub use cache::{CacheError, CacheRepository, Result};
pub use config::CacheConfig;
pub use proxy::CacheProxy;
