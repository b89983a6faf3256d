//! In-memory [`Store`] used by the router tests and local experiments.
//!
//! Mirrors the `PostgreSQL` schema's observable behavior: serial IDs starting
//! at 1, a unique `users.email`, no uniqueness on `favorites` or `cart`, and
//! inner-join semantics when listing favorites and cart lines.

use async_trait::async_trait;
use tokio::sync::RwLock;

use plant_shop_core::{CartItemId, Email, PlantId, Quantity, QuantityError, UserId};

use super::{RepositoryError, Store};
use crate::models::{CartItem, CartLine, NewCartItem, NewPlant, NewUser, Plant, User};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    plants: Vec<Plant>,
    favorites: Vec<(UserId, PlantId)>,
    cart: Vec<CartItem>,
    last_user_id: i32,
    last_plant_id: i32,
    last_cart_id: i32,
}

impl Tables {
    fn plant(&self, id: PlantId) -> Option<&Plant> {
        self.plants.iter().find(|p| p.id == id)
    }
}

/// A process-local store with no persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cart rows for `(user_id, plant_id)`.
    ///
    /// Exposed so tests can observe duplicate rows left by interleaved merges.
    pub async fn cart_row_count(&self, user_id: UserId, plant_id: PlantId) -> usize {
        self.tables
            .read()
            .await
            .cart
            .iter()
            .filter(|c| c.user_id == user_id && c.plant_id == plant_id)
            .count()
    }

    /// Number of favorite rows for `(user_id, plant_id)`.
    pub async fn favorite_row_count(&self, user_id: UserId, plant_id: PlantId) -> usize {
        self.tables
            .read()
            .await
            .favorites
            .iter()
            .filter(|&&(u, p)| u == user_id && p == plant_id)
            .count()
    }

    /// Number of stored users.
    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }

    async fn find_user_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| &u.email == email).cloned())
    }

    async fn insert_user(&self, user: &NewUser) -> Result<UserId, RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        tables.last_user_id += 1;
        let id = UserId::new(tables.last_user_id);
        tables.users.push(User {
            id,
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            password_hash: user.password_hash.clone(),
        });
        Ok(id)
    }

    async fn list_plants(&self, category: Option<&str>) -> Result<Vec<Plant>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .plants
            .iter()
            .filter(|p| category.is_none_or(|c| p.category == c))
            .cloned()
            .collect())
    }

    async fn insert_plant(&self, plant: &NewPlant) -> Result<Plant, RepositoryError> {
        let mut tables = self.tables.write().await;
        tables.last_plant_id += 1;
        let plant = Plant {
            id: PlantId::new(tables.last_plant_id),
            name: plant.name.clone(),
            price: plant.price,
            image: plant.image.clone(),
            category: plant.category.clone(),
        };
        tables.plants.push(plant.clone());
        Ok(plant)
    }

    async fn list_favorite_plants(&self, user_id: UserId) -> Result<Vec<Plant>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .favorites
            .iter()
            .filter(|(u, _)| *u == user_id)
            .filter_map(|(_, p)| tables.plant(*p).cloned())
            .collect())
    }

    async fn favorite_exists(
        &self,
        user_id: UserId,
        plant_id: PlantId,
    ) -> Result<bool, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.favorites.contains(&(user_id, plant_id)))
    }

    async fn insert_favorite(
        &self,
        user_id: UserId,
        plant_id: PlantId,
    ) -> Result<(), RepositoryError> {
        self.tables.write().await.favorites.push((user_id, plant_id));
        Ok(())
    }

    async fn delete_favorite(
        &self,
        user_id: UserId,
        plant_id: PlantId,
    ) -> Result<u64, RepositoryError> {
        let mut tables = self.tables.write().await;
        let before = tables.favorites.len();
        tables
            .favorites
            .retain(|&(u, p)| !(u == user_id && p == plant_id));
        Ok((before - tables.favorites.len()) as u64)
    }

    async fn list_cart(&self, user_id: UserId) -> Result<Vec<CartLine>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .cart
            .iter()
            .filter(|c| c.user_id == user_id)
            .filter_map(|c| {
                tables.plant(c.plant_id).map(|p| CartLine {
                    id: c.id,
                    name: p.name.clone(),
                    price: p.price,
                    image: p.image.clone(),
                    quantity: c.quantity,
                })
            })
            .collect())
    }

    async fn find_cart_item(
        &self,
        user_id: UserId,
        plant_id: PlantId,
    ) -> Result<Option<CartItem>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .cart
            .iter()
            .find(|c| c.user_id == user_id && c.plant_id == plant_id)
            .cloned())
    }

    async fn increment_cart_quantity(
        &self,
        id: CartItemId,
        by: Quantity,
    ) -> Result<Option<CartItem>, RepositoryError> {
        let mut tables = self.tables.write().await;
        let Some(item) = tables.cart.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };

        // Postgres rejects the same overflow with "integer out of range".
        item.quantity = item.quantity.checked_add(by).map_err(|e: QuantityError| {
            RepositoryError::Database(sqlx::Error::Protocol(e.to_string()))
        })?;
        Ok(Some(item.clone()))
    }

    async fn insert_cart_item(&self, item: &NewCartItem) -> Result<CartItem, RepositoryError> {
        let mut tables = self.tables.write().await;
        tables.last_cart_id += 1;
        let item = CartItem {
            id: CartItemId::new(tables.last_cart_id),
            user_id: item.user_id,
            plant_id: item.plant_id,
            quantity: item.quantity,
        };
        tables.cart.push(item.clone());
        Ok(item)
    }

    async fn delete_cart_item(&self, id: CartItemId) -> Result<u64, RepositoryError> {
        let mut tables = self.tables.write().await;
        let before = tables.cart.len();
        tables.cart.retain(|c| c.id != id);
        Ok((before - tables.cart.len()) as u64)
    }

    async fn clear_cart(&self, user_id: UserId) -> Result<u64, RepositoryError> {
        let mut tables = self.tables.write().await;
        let before = tables.cart.len();
        tables.cart.retain(|c| c.user_id != user_id);
        Ok((before - tables.cart.len()) as u64)
    }
}
