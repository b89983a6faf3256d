//! Cart types.

use serde::Serialize;

use plant_shop_core::{CartItemId, PlantId, Price, Quantity, UserId};

/// A row of the `cart` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct CartItem {
    pub id: CartItemId,
    pub user_id: UserId,
    pub plant_id: PlantId,
    pub quantity: Quantity,
}

/// Fields needed to insert a cart row.
#[derive(Debug, Clone, Copy)]
pub struct NewCartItem {
    pub user_id: UserId,
    pub plant_id: PlantId,
    pub quantity: Quantity,
}

/// A cart row joined with its plant, as listed to the customer.
///
/// `id` is the cart row ID, the handle used to remove the line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct CartLine {
    pub id: CartItemId,
    pub name: String,
    pub price: Price,
    pub image: String,
    pub quantity: Quantity,
}
