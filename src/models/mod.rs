//! Data models
//!
//! Database entities for Clubroom: users and their sessions.

mod session;
mod user;

pub use session::Session;
pub use user::User;
