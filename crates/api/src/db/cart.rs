//! Cart repository.

use sqlx::PgPool;

use plant_shop_core::{CartItemId, PlantId, Quantity, UserId};

use super::RepositoryError;
use crate::models::{CartItem, CartLine, NewCartItem};

/// Repository for the `cart` table.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Cart rows for a user joined with the plant catalog.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn lines_for_user(&self, user_id: UserId) -> Result<Vec<CartLine>, RepositoryError> {
        let lines = sqlx::query_as::<_, CartLine>(
            r"
            SELECT c.id, p.name, p.price, p.image, c.quantity
            FROM cart c
            JOIN plants p ON p.id = c.plant_id
            WHERE c.user_id = $1
            ORDER BY c.id
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(lines)
    }

    /// Find the row for `(user_id, plant_id)`, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find(
        &self,
        user_id: UserId,
        plant_id: PlantId,
    ) -> Result<Option<CartItem>, RepositoryError> {
        let item = sqlx::query_as::<_, CartItem>(
            r"
            SELECT id, user_id, plant_id, quantity
            FROM cart
            WHERE user_id = $1 AND plant_id = $2
            ORDER BY id
            LIMIT 1
            ",
        )
        .bind(user_id)
        .bind(plant_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(item)
    }

    /// Increase a row's quantity, returning the updated row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn increment(
        &self,
        id: CartItemId,
        by: Quantity,
    ) -> Result<Option<CartItem>, RepositoryError> {
        let item = sqlx::query_as::<_, CartItem>(
            r"
            UPDATE cart
            SET quantity = quantity + $1
            WHERE id = $2
            RETURNING id, user_id, plant_id, quantity
            ",
        )
        .bind(by)
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(item)
    }

    /// Insert a new cart row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, item: &NewCartItem) -> Result<CartItem, RepositoryError> {
        let item = sqlx::query_as::<_, CartItem>(
            r"
            INSERT INTO cart (user_id, plant_id, quantity)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, plant_id, quantity
            ",
        )
        .bind(item.user_id)
        .bind(item.plant_id)
        .bind(item.quantity)
        .fetch_one(self.pool)
        .await?;

        Ok(item)
    }

    /// Delete a row by ID, returning the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: CartItemId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM cart WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Delete every row owned by a user, returning the number removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn clear(&self, user_id: UserId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM cart WHERE user_id = $1")
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
