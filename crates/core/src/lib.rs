//! Core types and shared functionality for sw-cache.
//!
//! This crate provides:
//! - Request/response types and the security header set
//! - URL classification
//! - Cache partitions with SQLite and in-memory backends
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod classify;
pub mod config;
pub mod error;
pub mod headers;
pub mod message;

pub use cache::{CacheDb, CacheStore, MemoryStore, PartitionKind, PartitionNames, StoredResponse};
pub use classify::{Label, classify};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use message::{Request, Response};
