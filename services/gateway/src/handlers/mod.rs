//! HTTP handlers

mod health;
mod home;
mod login;
mod logout;

pub use health::health;
pub use home::home;
pub use login::{login_form, login_submit};
pub use logout::logout;
