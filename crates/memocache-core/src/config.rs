use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cache::{CacheError, DEFAULT_CACHE_DIR};

/// Repository configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheConfig {
    /// Root the cache directory is created under (default: current directory)
    #[serde(default)]
    pub base_path: Option<PathBuf>,

    /// Cache directory name below the base path (default: .cache)
    #[serde(default = "default_directory")]
    pub directory: String,
}

fn default_directory() -> String {
    DEFAULT_CACHE_DIR.to_string()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            base_path: None,
            directory: default_directory(),
        }
    }
}

impl CacheConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, CacheError> {
        let content = std::fs::read_to_string(path)?;
        let config: CacheConfig =
            serde_json::from_str(&content).map_err(|e| CacheError::Config(e.to_string()))?;
        Ok(config)
    }

    /// Create a default configuration and write it to a file
    pub fn init_file(path: &Path) -> Result<(), CacheError> {
        let config = CacheConfig::default();
        let json = serde_json::to_string_pretty(&config)
            .map_err(|e| CacheError::Config(e.to_string()))?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
