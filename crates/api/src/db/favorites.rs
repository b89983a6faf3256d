//! Favorites repository.

use sqlx::PgPool;

use plant_shop_core::{PlantId, UserId};

use super::{RepositoryError, conflict_on_unique};
use crate::models::Plant;

/// Repository for the `favorites` relation.
pub struct FavoriteRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FavoriteRepository<'a> {
    /// Create a new favorites repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Plants favorited by a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn plants_for_user(&self, user_id: UserId) -> Result<Vec<Plant>, RepositoryError> {
        let plants = sqlx::query_as::<_, Plant>(
            r"
            SELECT p.id, p.name, p.price, p.image, p.category
            FROM favorites f
            JOIN plants p ON p.id = f.plant_id
            WHERE f.user_id = $1
            ORDER BY p.id
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(plants)
    }

    /// Whether the `(user_id, plant_id)` relation is present.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&self, user_id: UserId, plant_id: PlantId) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS (
                SELECT 1 FROM favorites WHERE user_id = $1 AND plant_id = $2
            )
            ",
        )
        .bind(user_id)
        .bind(plant_id)
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    /// Insert the relation.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a unique index rejects the row.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, user_id: UserId, plant_id: PlantId) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO favorites (user_id, plant_id)
            VALUES ($1, $2)
            ",
        )
        .bind(user_id)
        .bind(plant_id)
        .execute(self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "favorite"))?;

        Ok(())
    }

    /// Delete the relation, returning the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, user_id: UserId, plant_id: PlantId) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM favorites
            WHERE user_id = $1 AND plant_id = $2
            ",
        )
        .bind(user_id)
        .bind(plant_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
