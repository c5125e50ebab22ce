//! Campus Client - SDK for relying parties
//!
//! Talks to the issuing authority over HTTP. Every call is bounded by the
//! configured timeouts and resolves to a tagged outcome; connectivity
//! failures are values, never panics or hangs.

pub mod auth;
pub mod config;
pub mod error;

pub use auth::{AuthClient, LoginOutcome, ValidateOutcome};
pub use config::{ClientConfig, ConfigError};
pub use error::ClientError;
