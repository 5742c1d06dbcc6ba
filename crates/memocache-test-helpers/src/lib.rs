//! Test utilities and fixtures for memocache
//!
//! This crate provides shared test helpers used by the integration tests
//! (tests/ directory) and benches of `memocache-core`.

pub mod cache;
pub mod fixtures;
pub mod mocks;

pub use cache::{init_tracing, temp_repository};
