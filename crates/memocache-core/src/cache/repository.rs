use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::CacheConfig;

use super::{CacheEntry, CacheError, KeyHasher, Result, DEFAULT_CACHE_DIR};

/// Reads from and writes to the on-disk cache
///
/// Entries live at `<base_path>/<directory>/<digest>`, one file per key.
pub struct CacheRepository {
    /// Root the cache directory is created under
    base_path: PathBuf,

    /// Name of the cache directory below `base_path`
    directory: String,

    /// Memoized key digests
    hasher: KeyHasher,
}

impl CacheRepository {
    /// Create a repository rooted at `base_path`, or at the current working
    /// directory when `None` or empty
    ///
    /// Relative paths are resolved against the current working directory once,
    /// here, so later directory changes do not move the cache.
    pub fn new(base_path: Option<&Path>) -> Result<Self> {
        let base_path = match base_path {
            Some(path) if !path.as_os_str().is_empty() => resolve_base(path)?,
            _ => std::env::current_dir()?,
        };

        Ok(Self::with_base(base_path))
    }

    /// Create a repository rooted at an explicit path
    pub fn at(base_path: impl AsRef<Path>) -> Result<Self> {
        Self::new(Some(base_path.as_ref()))
    }

    /// Create a repository from a loaded configuration
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        let mut repository = Self::new(config.base_path.as_deref())?;
        repository.set_cache_directory(&config.directory)?;
        Ok(repository)
    }

    fn with_base(base_path: PathBuf) -> Self {
        Self {
            base_path,
            directory: DEFAULT_CACHE_DIR.to_string(),
            hasher: KeyHasher::new(),
        }
    }

    /// Read a cached value, `None` on a miss
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.entry_path(key);

        let exists = path
            .try_exists()
            .map_err(|e| CacheError::permissions(&path, format!("unable to stat entry: {}", e)))?;

        if !exists {
            debug!("Cache miss for {:?}", key);
            return Ok(None);
        }

        debug!("Cache hit for {:?}", key);
        self.read_entry(&path).map(Some)
    }

    /// Read a cached value, falling back to `default` on a miss
    ///
    /// The fallback is returned as is and never written to disk.
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    /// Read a cached value, or compute, store and return it on a miss
    pub fn get_or_compute<T, F>(&self, key: &str, compute: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> T,
    {
        self.get_or_try_compute(key, || Ok::<T, CacheError>(compute()))
    }

    /// Fallible form of [`get_or_compute`](Self::get_or_compute)
    ///
    /// Nothing is stored when `compute` fails.
    pub fn get_or_try_compute<T, E, F>(&self, key: &str, compute: F) -> std::result::Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<CacheError>,
        F: FnOnce() -> std::result::Result<T, E>,
    {
        if let Some(value) = self.get(key)? {
            return Ok(value);
        }

        let value = compute()?;
        self.set(key, &value)?;
        Ok(value)
    }

    /// Whether an entry exists for `key`, without reading it
    ///
    /// An entry whose existence cannot be checked counts as absent; [`get`](Self::get)
    /// reports the same condition as an error.
    pub fn has(&self, key: &str) -> bool {
        self.entry_path(key).try_exists().unwrap_or(false)
    }

    /// Store `content` under `key`, replacing any previous entry
    ///
    /// The entry is tagged with `T`; reading it back as any other type fails
    /// with [`CacheError::TypeMismatch`].
    pub fn set<T: Serialize + DeserializeOwned>(&self, key: &str, content: &T) -> Result<()> {
        self.ensure_cache_dir()?;

        let path = self.entry_path(key);
        let bytes = CacheEntry::borrowed(content).to_bytes()?;

        fs::write(&path, bytes)
            .map_err(|e| CacheError::permissions(&path, format!("unable to write: {}", e)))?;

        debug!("Stored cache entry for {:?} at {:?}", key, path);
        Ok(())
    }

    /// Remove every entry, keeping the cache directory itself
    pub fn clear(&self) -> Result<()> {
        let directory = self.directory_path();

        if !directory.is_dir() {
            debug!("Cache directory {:?} does not exist, nothing to clear", directory);
            return Ok(());
        }

        remove_directory_contents(&directory)?;

        info!("Cache cleared");
        Ok(())
    }

    /// Name of the cache directory
    pub fn cache_directory(&self) -> &str {
        &self.directory
    }

    /// Point the repository at another cache directory
    ///
    /// Path separators are trimmed from both ends. Existing entries are not
    /// migrated.
    pub fn set_cache_directory(&mut self, directory: &str) -> Result<()> {
        let directory = directory.trim_matches(|c| c == '/' || c == '\\');

        if directory.is_empty() {
            return Err(CacheError::Config(
                "cache directory name must not be empty".to_string(),
            ));
        }

        if Path::new(directory)
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(CacheError::Config(format!(
                "cache directory {:?} must stay inside the base path",
                directory
            )));
        }

        info!("Switching cache directory to {:?}", directory);
        self.directory = directory.to_string();
        Ok(())
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Full path of the cache directory
    pub fn directory_path(&self) -> PathBuf {
        self.base_path.join(&self.directory)
    }

    /// Full path of the file backing `key`
    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.directory_path().join(self.digest(key))
    }

    /// Hex digest naming the entry file for `key`
    pub fn digest(&self, key: &str) -> String {
        self.hasher.digest(key)
    }

    fn ensure_cache_dir(&self) -> Result<()> {
        let directory = self.directory_path();
        if directory.is_dir() {
            return Ok(());
        }

        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o777);
        }

        builder.create(&directory).map_err(|e| {
            CacheError::permissions(&directory, format!("unable to create directory: {}", e))
        })
    }

    fn read_entry<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let bytes = fs::read(path)
            .map_err(|e| CacheError::permissions(path, format!("unable to read: {}", e)))?;

        if bytes.is_empty() {
            return Err(CacheError::permissions(path, "unable to read: entry is empty"));
        }

        match CacheEntry::<T>::from_bytes(&bytes) {
            Ok(entry) => Ok(entry.into_value()),
            Err(e) => {
                warn!("Corrupted cache entry {:?}: {:?}", path, e);
                Err(e)
            }
        }
    }
}

/// Absolute form of `path`, without trailing separators or `.` segments
fn resolve_base(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    Ok(absolute.components().collect())
}

fn remove_directory_contents(directory: &Path) -> Result<()> {
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        let path = entry.path();

        // file_type does not follow symlinks
        if entry.file_type()?.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}
