//! DocBase Core Data-Access Layer
//!
//! This crate provides a thin asynchronous facade over a document database
//! (SurrealDB): generic collection/document reads, writes, and atomic batch
//! updates. Query execution, transaction atomicity, and consistency are
//! delegated to the underlying engine — this layer performs no caching,
//! retries, or connection pooling of its own.
//!
//! # Modules
//!
//! - [`models`] - Value types (Update, Record, DocumentRef)
//! - [`db`] - The DataService facade and its supporting types

pub mod db;
pub mod models;

// Re-export commonly used types
pub use db::*;
pub use models::*;
