//! Campus Types - Shared domain types
//!
//! This crate contains types shared by the issuing authority, the gateway
//! and the client SDK:
//! - User identity and roles
//! - Token claims
//! - JSON request/response bodies of the issuing authority

pub mod api;
pub mod claims;
pub mod role;
pub mod user;

pub use api::*;
pub use claims::*;
pub use role::*;
pub use user::*;
