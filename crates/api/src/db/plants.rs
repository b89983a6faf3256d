//! Plant catalog repository.

use sqlx::PgPool;

use super::RepositoryError;
use crate::models::{NewPlant, Plant};

/// Repository for plant catalog operations.
pub struct PlantRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PlantRepository<'a> {
    /// Create a new plant repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every plant in storage order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Plant>, RepositoryError> {
        let plants = sqlx::query_as::<_, Plant>(
            r"
            SELECT id, name, price, image, category
            FROM plants
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(plants)
    }

    /// List plants whose category equals `category` exactly.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_category(&self, category: &str) -> Result<Vec<Plant>, RepositoryError> {
        let plants = sqlx::query_as::<_, Plant>(
            r"
            SELECT id, name, price, image, category
            FROM plants
            WHERE category = $1
            ORDER BY id
            ",
        )
        .bind(category)
        .fetch_all(self.pool)
        .await?;

        Ok(plants)
    }

    /// Insert a plant. No duplicate check is made.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, plant: &NewPlant) -> Result<Plant, RepositoryError> {
        let plant = sqlx::query_as::<_, Plant>(
            r"
            INSERT INTO plants (name, price, image, category)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, price, image, category
            ",
        )
        .bind(&plant.name)
        .bind(plant.price)
        .bind(&plant.image)
        .bind(&plant.category)
        .fetch_one(self.pool)
        .await?;

        Ok(plant)
    }
}
