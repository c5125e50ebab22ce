//! Campus Auth Core - Authentication business logic
//!
//! Credential verification against an injected user directory, and
//! issuance/validation of signed, time-limited session tokens.

pub mod config;
pub mod credentials;
pub mod crypto;
pub mod error;
pub mod service;
pub mod token;

pub use config::*;
pub use credentials::*;
pub use crypto::*;
pub use error::*;
pub use service::*;
pub use token::*;
