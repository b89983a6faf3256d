//! Query gateway between the route handlers and the relational store.
//!
//! Handlers never hold a database handle. They call the [`Store`] capability
//! held in [`AppState`](crate::state::AppState), which is backed by
//! [`PgStore`] in production and [`MemoryStore`] in tests.
//!
//! # Tables
//!
//! Schema changes are applied out of band; this crate does not migrate.
//!
//! ```sql
//! CREATE TABLE users (
//!     id        SERIAL PRIMARY KEY,
//!     full_name TEXT NOT NULL,
//!     email     TEXT NOT NULL UNIQUE,
//!     phone     TEXT,
//!     password  TEXT NOT NULL
//! );
//!
//! CREATE TABLE plants (
//!     id       SERIAL PRIMARY KEY,
//!     name     TEXT NOT NULL,
//!     price    NUMERIC(10, 2) NOT NULL,
//!     image    TEXT NOT NULL,
//!     category TEXT NOT NULL
//! );
//!
//! CREATE TABLE favorites (
//!     user_id  INTEGER NOT NULL REFERENCES users (id),
//!     plant_id INTEGER NOT NULL REFERENCES plants (id)
//! );
//!
//! CREATE TABLE cart (
//!     id       SERIAL PRIMARY KEY,
//!     user_id  INTEGER NOT NULL REFERENCES users (id),
//!     plant_id INTEGER NOT NULL REFERENCES plants (id),
//!     quantity INTEGER NOT NULL CHECK (quantity > 0)
//! );
//! ```
//!
//! `favorites` and `cart` carry no uniqueness constraint on
//! `(user_id, plant_id)`; duplicates are prevented by a lookup before the
//! write, which is not atomic under concurrent requests.

pub mod cart;
pub mod favorites;
pub mod memory;
pub mod plants;
pub mod postgres;
pub mod users;

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use plant_shop_core::{CartItemId, Email, PlantId, Quantity, UserId};

use crate::config::DatabaseConfig;
use crate::models::{CartItem, CartLine, NewCartItem, NewPlant, NewUser, Plant, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Map a unique-constraint violation to [`RepositoryError::Conflict`].
pub(crate) fn conflict_on_unique(err: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{what} already exists"));
    }
    RepositoryError::Database(err)
}

/// Data access capability used by the HTTP handlers.
///
/// Each method issues a single parameterized statement. Sequences such as
/// "look up, then insert" are composed by the caller and are not atomic.
#[async_trait]
pub trait Store: Send + Sync {
    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;

    // Users

    async fn find_user_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError>;

    /// Insert a user and return its ID.
    ///
    /// Returns `RepositoryError::Conflict` if the email is already taken.
    async fn insert_user(&self, user: &NewUser) -> Result<UserId, RepositoryError>;

    // Plants

    /// List plants, optionally restricted to an exact category match.
    async fn list_plants(&self, category: Option<&str>) -> Result<Vec<Plant>, RepositoryError>;

    async fn insert_plant(&self, plant: &NewPlant) -> Result<Plant, RepositoryError>;

    // Favorites

    /// Plants the user has marked as favorite.
    async fn list_favorite_plants(&self, user_id: UserId) -> Result<Vec<Plant>, RepositoryError>;

    async fn favorite_exists(
        &self,
        user_id: UserId,
        plant_id: PlantId,
    ) -> Result<bool, RepositoryError>;

    async fn insert_favorite(
        &self,
        user_id: UserId,
        plant_id: PlantId,
    ) -> Result<(), RepositoryError>;

    /// Delete a favorite, returning the number of rows removed.
    async fn delete_favorite(
        &self,
        user_id: UserId,
        plant_id: PlantId,
    ) -> Result<u64, RepositoryError>;

    // Cart

    /// Cart rows for a user joined with their plants.
    async fn list_cart(&self, user_id: UserId) -> Result<Vec<CartLine>, RepositoryError>;

    async fn find_cart_item(
        &self,
        user_id: UserId,
        plant_id: PlantId,
    ) -> Result<Option<CartItem>, RepositoryError>;

    /// Add `by` to a cart row's quantity.
    ///
    /// Returns `None` if the row no longer exists.
    async fn increment_cart_quantity(
        &self,
        id: CartItemId,
        by: Quantity,
    ) -> Result<Option<CartItem>, RepositoryError>;

    async fn insert_cart_item(&self, item: &NewCartItem) -> Result<CartItem, RepositoryError>;

    /// Delete a cart row by ID regardless of owner, returning rows removed.
    async fn delete_cart_item(&self, id: CartItemId) -> Result<u64, RepositoryError>;

    /// Delete every cart row owned by `user_id`, returning rows removed.
    async fn clear_cart(&self, user_id: UserId) -> Result<u64, RepositoryError>;
}

/// Create a `PostgreSQL` connection pool from database settings.
///
/// The pool is created once at startup and shared by every request.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(config.connect_options())
        .await
}
