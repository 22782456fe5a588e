//! Common utilities and types shared across Vigil components.

pub mod error;
pub mod logging;

pub use error::{Error, Result};
