//! Caching proxy around an arbitrary value
//!
//! [`CacheProxy`] owns a target and borrows a [`CacheRepository`]. Each call
//! names the method it stands for and passes its arguments; the proxy either
//! forwards the call directly (ignored methods) or answers it from the cache,
//! invoking the target only on a miss.
//!
//! Keys are built from the method name and arguments only, never from the
//! target's state. A method is only safe to cache when its result depends on
//! its arguments alone, or when stale results are acceptable.
//!
//! Callers usually expose the cacheable operations as a trait implemented
//! both by the target type and by `CacheProxy<'_, Target>`:
//!
//! ```no_run
//! use memocache_core::{CacheProxy, CacheRepository, Result};
//!
//! struct Catalog;
//!
//! impl Catalog {
//!     fn price(&self, sku: &str) -> u64 {
//!         sku.len() as u64 * 100
//!     }
//! }
//!
//! trait Prices {
//!     fn price(&self, sku: &str) -> Result<u64>;
//! }
//!
//! impl Prices for CacheProxy<'_, Catalog> {
//!     fn price(&self, sku: &str) -> Result<u64> {
//!         self.call("price", &(sku,), |catalog| catalog.price(sku))
//!     }
//! }
//!
//! let cache = CacheRepository::at("/tmp/prices")?;
//! let catalog = CacheProxy::new(&cache, Catalog, Vec::<String>::new());
//! assert_eq!(catalog.price("abc")?, 300);
//! # Ok::<(), memocache_core::CacheError>(())
//! ```

mod key;

pub use key::cache_key;

use rustc_hash::FxHashSet;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::trace;

use crate::cache::{CacheError, CacheRepository, Result};

/// How a single call is served
enum Route {
    /// Forward to the target, bypassing the cache
    Direct,

    /// Serve through the cache under this key
    Cached(String),
}

/// Routes method calls on `target` through a [`CacheRepository`]
pub struct CacheProxy<'a, T> {
    /// Repository backing every cached call
    cache: &'a CacheRepository,

    /// The wrapped value
    target: T,

    /// Methods that always reach the target
    ignored_methods: FxHashSet<String>,

    /// Leading component of every cache key
    namespace: String,
}

impl<'a, T> CacheProxy<'a, T> {
    /// Wrap `target`, never caching the methods named in `ignored_methods`
    ///
    /// The key namespace defaults to the proxy's type name, which is not
    /// guaranteed to stay the same across compiler versions. Use
    /// [`with_namespace`](Self::with_namespace) when entries must outlive a
    /// toolchain upgrade.
    pub fn new<I, S>(cache: &'a CacheRepository, target: T, ignored_methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cache,
            target,
            ignored_methods: ignored_methods.into_iter().map(Into::into).collect(),
            namespace: std::any::type_name::<Self>().to_string(),
        }
    }

    /// Replace the namespace mixed into every key
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn repository(&self) -> &'a CacheRepository {
        self.cache
    }

    pub fn is_ignored(&self, method: &str) -> bool {
        self.ignored_methods.contains(method)
    }

    pub fn ignored_methods(&self) -> impl Iterator<Item = &str> {
        self.ignored_methods.iter().map(String::as_str)
    }

    /// Cache key a call to `method` with `args` is stored under
    pub fn key_for<A: Serialize + ?Sized>(&self, method: &str, args: &A) -> Result<String> {
        cache_key(&self.namespace, method, args)
    }

    /// Call a `&self` method on the target
    pub fn call<A, R, F>(&self, method: &str, args: &A, invoke: F) -> Result<R>
    where
        A: Serialize + ?Sized,
        R: Serialize + DeserializeOwned,
        F: FnOnce(&T) -> R,
    {
        match self.route(method, args)? {
            Route::Direct => Ok(invoke(&self.target)),
            Route::Cached(key) => self.cache.get_or_compute(&key, || invoke(&self.target)),
        }
    }

    /// Call a `&mut self` method on the target
    ///
    /// A cache hit skips the method body, including any mutation it makes.
    pub fn call_mut<A, R, F>(&mut self, method: &str, args: &A, invoke: F) -> Result<R>
    where
        A: Serialize + ?Sized,
        R: Serialize + DeserializeOwned,
        F: FnOnce(&mut T) -> R,
    {
        let route = self.route(method, args)?;
        let target = &mut self.target;

        match route {
            Route::Direct => Ok(invoke(target)),
            Route::Cached(key) => self.cache.get_or_compute(&key, || invoke(target)),
        }
    }

    /// Call an associated function of the target type
    pub fn call_static<A, R, F>(&self, method: &str, args: &A, invoke: F) -> Result<R>
    where
        A: Serialize + ?Sized,
        R: Serialize + DeserializeOwned,
        F: FnOnce() -> R,
    {
        match self.route(method, args)? {
            Route::Direct => Ok(invoke()),
            Route::Cached(key) => self.cache.get_or_compute(&key, invoke),
        }
    }

    /// Call a fallible `&self` method on the target
    ///
    /// Errors are returned to the caller and never cached.
    pub fn try_call<A, R, E, F>(&self, method: &str, args: &A, invoke: F) -> std::result::Result<R, E>
    where
        A: Serialize + ?Sized,
        R: Serialize + DeserializeOwned,
        E: From<CacheError>,
        F: FnOnce(&T) -> std::result::Result<R, E>,
    {
        match self.route(method, args)? {
            Route::Direct => invoke(&self.target),
            Route::Cached(key) => self.cache.get_or_try_compute(&key, || invoke(&self.target)),
        }
    }

    /// The wrapped value, for reading its live state
    pub fn target(&self) -> &T {
        &self.target
    }

    /// The wrapped value, for changing its live state
    ///
    /// Results already cached are not affected.
    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn into_inner(self) -> T {
        self.target
    }

    fn route<A: Serialize + ?Sized>(&self, method: &str, args: &A) -> Result<Route> {
        if self.is_ignored(method) {
            trace!("Forwarding ignored method {}", method);
            return Ok(Route::Direct);
        }

        self.key_for(method, args).map(Route::Cached)
    }
}
