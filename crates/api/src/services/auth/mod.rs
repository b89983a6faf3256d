//! Authentication service.
//!
//! Password signup and login. No session or token is issued: a successful
//! login returns the user's public profile and the client resubmits its
//! `user_id` on later calls.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use plant_shop_core::{Email, UserId};

use crate::db::{RepositoryError, Store};
use crate::models::{NewUser, UserProfile};

/// Validated-for-presence signup fields.
#[derive(Debug, Clone)]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    pub confirm_password: String,
}

/// Authentication service over a [`Store`].
pub struct AuthService<'a> {
    store: &'a dyn Store,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Register a new user.
    ///
    /// The email lookup and the insert are separate statements. A concurrent
    /// signup for the same email that slips between them is still rejected by
    /// the unique index on `users.email`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordMismatch` if the confirmation differs.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn register(&self, registration: Registration) -> Result<UserId, AuthError> {
        if registration.password != registration.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        let email = Email::parse(&registration.email)?;

        if self.store.find_user_by_email(&email).await?.is_some() {
            return Err(AuthError::UserAlreadyExists);
        }

        let password_hash = hash_password_blocking(registration.password).await?;

        let user = NewUser {
            full_name: registration.full_name,
            email,
            phone: registration.phone,
            password_hash,
        };

        self.store.insert_user(&user).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
            other => AuthError::Repository(other),
        })
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for a malformed or unknown
    /// email and for a wrong password alike.
    pub async fn login(&self, email: &str, password: String) -> Result<UserProfile, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .store
            .find_user_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let hash = user.password_hash.clone();
        tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|_| AuthError::PasswordHash)??;

        Ok(UserProfile::from(user))
    }
}

/// Hash off the async executor; Argon2 is deliberately slow.
async fn hash_password_blocking(password: String) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|_| AuthError::PasswordHash)?
}

/// Hash a password using Argon2id with a random salt.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored PHC hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn registration(email: &str, password: &str, confirm: &str) -> Registration {
        Registration {
            full_name: "Basil Leaf".to_string(),
            email: email.to_string(),
            phone: None,
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn test_hash_is_salted_and_verifiable() {
        let first = hash_password("correct horse").unwrap();
        let second = hash_password("correct horse").unwrap();

        assert_ne!(first, second);
        assert!(first.starts_with("$argon2id$"));
        assert!(verify_password("correct horse", &first).is_ok());
        assert!(matches!(
            verify_password("wrong horse", &first),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);

        let id = auth
            .register(registration("basil@example.com", "pesto123", "pesto123"))
            .await
            .unwrap();

        let profile = auth
            .login("basil@example.com", "pesto123".to_string())
            .await
            .unwrap();
        assert_eq!(profile.id, id);
        assert_eq!(profile.full_name, "Basil Leaf");
    }

    #[tokio::test]
    async fn test_register_rejects_mismatch_without_writing() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);

        let result = auth
            .register(registration("basil@example.com", "pesto123", "pesto124"))
            .await;
        assert!(matches!(result, Err(AuthError::PasswordMismatch)));
        assert_eq!(store.user_count().await, 0);
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);

        auth.register(registration("basil@example.com", "a", "a"))
            .await
            .unwrap();
        let result = auth
            .register(registration("basil@example.com", "b", "b"))
            .await;
        assert!(matches!(result, Err(AuthError::UserAlreadyExists)));
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);
        auth.register(registration("basil@example.com", "pesto123", "pesto123"))
            .await
            .unwrap();

        let unknown = auth.login("nobody@example.com", "pesto123".to_string()).await;
        let wrong = auth.login("basil@example.com", "nope".to_string()).await;
        let malformed = auth.login("not-an-email", "pesto123".to_string()).await;

        assert!(matches!(unknown, Err(AuthError::InvalidCredentials)));
        assert!(matches!(wrong, Err(AuthError::InvalidCredentials)));
        assert!(matches!(malformed, Err(AuthError::InvalidCredentials)));
    }
}
