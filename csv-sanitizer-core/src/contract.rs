#![allow(unused)]

//! # contract: interface to the object store holding raw and cleaned files
//!
//! The sanitizer never talks to a storage backend directly. Every read and write goes
//! through the [`ObjectStore`] trait so the handler can run against a real bucket,
//! a local directory ([`crate::store::LocalObjectStore`]) or a mock in tests.
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall`; with the default `test-export-mocks` feature
//!   [`MockObjectStore`] is available to integration tests in this and dependent crates.
//!
//! ## Adding New Backends
//! - Implement the trait for your backend.
//! - Convert all backend-specific failures to a boxed error; the handler reports them
//!   as unexpected failures with the error text preserved.

use async_trait::async_trait;

use mockall::{automock, predicate::*};

/// Error type for object store operations (simple boxed error).
pub type StorageError = Box<dyn std::error::Error + Send + Sync>;

/// Get/put access to objects addressed by bucket and key.
///
/// Calls are awaited one at a time by the handler; implementations need no internal
/// ordering guarantees beyond a single call completing before it returns.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Read the full body of an object.
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError>;

    /// Create or replace an object with the given body.
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>)
        -> Result<(), StorageError>;
}
