#![doc = "csv-sanitizer-core: core logic library for csv-sanitizer."]

//! This crate contains the row-cleaning logic, its input/output contract and the
//! invocation handler that ties it to an object store.
//! Process lifecycle, CLI parsing and subscriber setup live in the `csv-sanitizer` crate.
//!
//! # Usage
//! Build a [`config::SanitizerConfig`], pick an [`contract::ObjectStore`] implementation
//! and call [`handler::handle_object`] or [`handler::handle_notification`].

pub mod config;
pub mod contract;
pub mod document;
pub mod error;
pub mod event;
pub mod handler;
pub mod keys;
pub mod sanitize;
pub mod store;

pub use config::SanitizerConfig;
pub use contract::{ObjectStore, StorageError};
pub use error::{ConfigError, FailureKind, InvocationError, SanitizeError};
pub use handler::{handle_notification, handle_object, InvocationResult};
pub use sanitize::{CleaningResult, Sanitizer};
