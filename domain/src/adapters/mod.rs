//! Adapters that live inside the domain crate for convenience.
//!
//! `memory_storage` is the storage used by the server. The mocks are test
//! doubles shared with the HTTP layer's tests.

pub mod memory_storage;
pub mod repository_mock;
pub mod storage_mock;
