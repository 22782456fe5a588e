//! Vigil: a single-process uptime-monitoring engine.
//!
//! The engine periodically probes user-registered network endpoints, decides
//! whether each is up or down, persists that state, and raises an alert only
//! when the state actually changes. A second, independent cycle compresses
//! and truncates the per-check audit logs.
//!
//! Each cycle enumerates the record store and spawns one pipeline task per
//! check (validate → probe → process outcome). Failures are isolated to the
//! check or log artifact they originate from; nothing here halts the process.

pub mod alert;
pub mod config;
pub mod logs;
pub mod rotator;
pub mod server;
pub mod store;
pub mod supervisor;
pub mod types;
pub mod validate;
pub mod worker;

pub use config::Config;
pub use server::Engine;
