//! Client code for sw-cache.
//!
//! This crate provides the network fetcher, the caching strategies and the
//! request router with its lifecycle handlers, shared by the server.

pub mod fetch;
pub mod strategy;
pub mod worker;

#[cfg(test)]
mod testing;

pub use fetch::{FetchClient, FetchConfig, Fetcher, canonicalize};
pub use strategy::{Strategy, StrategyExecutor};
pub use worker::{ActivateReport, InstallReport, Notification, ServiceWorker, SyncOutcome, WorkerState};
