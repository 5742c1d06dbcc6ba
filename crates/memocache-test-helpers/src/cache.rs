//! Throwaway repositories and test logging

use memocache_core::CacheRepository;
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

/// Repository rooted in a fresh temporary directory
///
/// Keep the returned `TempDir` alive for as long as the repository is used.
pub fn temp_repository() -> (TempDir, CacheRepository) {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let repository = CacheRepository::at(temp_dir.path()).expect("failed to open repository");
    (temp_dir, repository)
}

/// Install a fmt subscriber writing through the test harness
///
/// Set RUST_LOG=memocache_core=debug to see cache hits and misses.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
