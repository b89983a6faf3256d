//! `PostgreSQL`-backed [`Store`].

use async_trait::async_trait;
use sqlx::PgPool;

use plant_shop_core::{CartItemId, Email, PlantId, Quantity, UserId};

use super::cart::CartRepository;
use super::favorites::FavoriteRepository;
use super::plants::PlantRepository;
use super::users::UserRepository;
use super::{RepositoryError, Store};
use crate::models::{CartItem, CartLine, NewCartItem, NewPlant, NewUser, Plant, User};

/// Store backed by a shared `PostgreSQL` pool.
///
/// Cheap to clone; clones share the pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn find_user_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        UserRepository::new(&self.pool).get_by_email(email).await
    }

    async fn insert_user(&self, user: &NewUser) -> Result<UserId, RepositoryError> {
        UserRepository::new(&self.pool).create(user).await
    }

    async fn list_plants(&self, category: Option<&str>) -> Result<Vec<Plant>, RepositoryError> {
        let plants = PlantRepository::new(&self.pool);
        match category {
            Some(category) => plants.list_by_category(category).await,
            None => plants.list().await,
        }
    }

    async fn insert_plant(&self, plant: &NewPlant) -> Result<Plant, RepositoryError> {
        PlantRepository::new(&self.pool).create(plant).await
    }

    async fn list_favorite_plants(&self, user_id: UserId) -> Result<Vec<Plant>, RepositoryError> {
        FavoriteRepository::new(&self.pool)
            .plants_for_user(user_id)
            .await
    }

    async fn favorite_exists(
        &self,
        user_id: UserId,
        plant_id: PlantId,
    ) -> Result<bool, RepositoryError> {
        FavoriteRepository::new(&self.pool)
            .exists(user_id, plant_id)
            .await
    }

    async fn insert_favorite(
        &self,
        user_id: UserId,
        plant_id: PlantId,
    ) -> Result<(), RepositoryError> {
        FavoriteRepository::new(&self.pool)
            .create(user_id, plant_id)
            .await
    }

    async fn delete_favorite(
        &self,
        user_id: UserId,
        plant_id: PlantId,
    ) -> Result<u64, RepositoryError> {
        FavoriteRepository::new(&self.pool)
            .delete(user_id, plant_id)
            .await
    }

    async fn list_cart(&self, user_id: UserId) -> Result<Vec<CartLine>, RepositoryError> {
        CartRepository::new(&self.pool).lines_for_user(user_id).await
    }

    async fn find_cart_item(
        &self,
        user_id: UserId,
        plant_id: PlantId,
    ) -> Result<Option<CartItem>, RepositoryError> {
        CartRepository::new(&self.pool).find(user_id, plant_id).await
    }

    async fn increment_cart_quantity(
        &self,
        id: CartItemId,
        by: Quantity,
    ) -> Result<Option<CartItem>, RepositoryError> {
        CartRepository::new(&self.pool).increment(id, by).await
    }

    async fn insert_cart_item(&self, item: &NewCartItem) -> Result<CartItem, RepositoryError> {
        CartRepository::new(&self.pool).create(item).await
    }

    async fn delete_cart_item(&self, id: CartItemId) -> Result<u64, RepositoryError> {
        CartRepository::new(&self.pool).delete(id).await
    }

    async fn clear_cart(&self, user_id: UserId) -> Result<u64, RepositoryError> {
        CartRepository::new(&self.pool).clear(user_id).await
    }
}
