//! User domain types.

use serde::Serialize;

use plant_shop_core::{Email, UserId};

/// A shop account as stored in the `users` table.
///
/// Not `Serialize`: the password hash must never reach a response body.
/// Use [`UserProfile`] for that.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub full_name: String,
    pub email: Email,
    pub phone: Option<String>,
    /// PHC-formatted password hash.
    #[sqlx(rename = "password")]
    pub password_hash: String,
}

/// Fields needed to create a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub password_hash: String,
}

/// The public subset of a user returned after login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub id: UserId,
    pub full_name: String,
    pub email: Email,
    pub phone: Option<String>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            phone: user.phone,
        }
    }
}
