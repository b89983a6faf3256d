//! Business logic services.
//!
//! Most routes translate a request straight into one or two [`Store`](crate::db::Store)
//! calls. Account handling is the exception: it owns password hashing and the
//! rules that keep login failures indistinguishable.

pub mod auth;

pub use auth::{AuthError, AuthService, Registration};
