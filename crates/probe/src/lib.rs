//! Outbound probing for the Vigil uptime monitor.
//!
//! This crate issues one HTTP(S) request per registered check and resolves it
//! to exactly one [`Outcome`]: a response code, a transport error, or a
//! deadline expiry, whichever happens first.
//!
//! # Example
//!
//! ```no_run
//! use probe::{Method, ProbeExecutor, ProbeSpec, Protocol};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), reqwest::Error> {
//! let executor = ProbeExecutor::new()?;
//!
//! let spec = ProbeSpec {
//!     protocol: Protocol::Http,
//!     method: Method::Get,
//!     target: "example.com/health".to_string(),
//!     timeout: Duration::from_secs(3),
//! };
//!
//! let outcome = executor.probe(&spec).await;
//! if outcome.is_success(&[200]) {
//!     println!("endpoint is up");
//! }
//! # Ok(())
//! # }
//! ```

pub mod executor;
pub mod types;

pub use executor::ProbeExecutor;
pub use types::{ErrorKind, Method, Outcome, OutcomeError, ProbeSpec, Protocol};
