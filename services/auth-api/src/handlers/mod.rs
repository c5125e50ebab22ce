//! HTTP handlers

mod auth;
mod health;

pub use auth::{login, validate};
pub use health::{health, ready};
