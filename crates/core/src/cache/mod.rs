//! Cache partitions for intercepted responses.
//!
//! Responses are stored per partition, keyed by request URL. Storage sits
//! behind the [`CacheStore`] trait with two backends:
//!
//! - [`CacheDb`]: SQLite via tokio-rusqlite, WAL mode, versioned migrations
//! - [`MemoryStore`]: process-local maps, for tests and ephemeral runs

pub mod connection;
pub mod entries;
pub mod memory;
pub mod migrations;
pub mod store;
pub mod stored;

pub use crate::Error;

pub use connection::CacheDb;
pub use memory::MemoryStore;
pub use store::{CacheStore, PartitionKind, PartitionNames};
pub use stored::StoredResponse;
