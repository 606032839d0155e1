//! Services layer - business logic
//!
//! Services implement the business rules and coordinate between the
//! repositories and the web layer.

pub mod password;
pub mod user;
pub mod validation;

pub use password::{hash_password, verify_password};
pub use user::{LoginInput, SignupInput, UserService, UserServiceError};
pub use validation::{validate_login, validate_signup, ValidationError};
