//! Cart and checkout handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use plant_shop_core::{CartItemId, PlantId, Quantity, UserId};

use super::MessageResponse;
use super::extract::{ApiJson, ApiPath};
use crate::error::{AppError, Result};
use crate::models::{CartItem, CartLine, NewCartItem};
use crate::state::AppState;

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub user_id: Option<UserId>,
    pub plant_id: Option<PlantId>,
    pub quantity: Option<i64>,
}

/// Add-to-cart response body.
#[derive(Debug, Serialize)]
pub struct AddToCartResponse {
    pub message: &'static str,
    pub item: CartItem,
}

/// Checkout request body.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub user_id: Option<UserId>,
}

/// Checkout response body.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub message: &'static str,
    pub items_removed: u64,
}

/// A user's cart lines with plant details.
///
/// GET /api/cart/{user_id}
#[instrument(skip_all, fields(%user_id))]
pub async fn index(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<UserId>,
) -> Result<Json<Vec<CartLine>>> {
    let lines = state.store().list_cart(user_id).await?;
    Ok(Json(lines))
}

/// Add a plant to the cart, merging into an existing line.
///
/// POST /api/cart
///
/// Lookup and write are separate statements, so concurrent adds of the same
/// plant for the same user may insert two rows.
#[instrument(skip_all, fields(user_id = ?req.user_id, plant_id = ?req.plant_id))]
pub async fn add(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<AddToCartRequest>,
) -> Result<Json<AddToCartResponse>> {
    let (Some(user_id), Some(plant_id), Some(quantity)) = (req.user_id, req.plant_id, req.quantity)
    else {
        return Err(AppError::validation(
            "user_id, plant_id and quantity are required",
        ));
    };
    let quantity = Quantity::new(quantity).map_err(|e| AppError::validation(e.to_string()))?;

    let store = state.store();
    let new_item = NewCartItem {
        user_id,
        plant_id,
        quantity,
    };

    let item = match store.find_cart_item(user_id, plant_id).await? {
        Some(existing) => {
            existing
                .quantity
                .checked_add(quantity)
                .map_err(|e| AppError::validation(e.to_string()))?;

            match store.increment_cart_quantity(existing.id, quantity).await? {
                Some(updated) => updated,
                // Row was removed between lookup and update.
                None => store.insert_cart_item(&new_item).await?,
            }
        }
        None => store.insert_cart_item(&new_item).await?,
    };

    tracing::info!(cart_item_id = %item.id, quantity = %item.quantity, "Cart updated");

    Ok(Json(AddToCartResponse {
        message: "Cart updated",
        item,
    }))
}

/// Remove a cart line by its row ID.
///
/// DELETE /api/cart/{cart_item_id}
///
/// The row is removed regardless of which user owns it, and a missing row is
/// not an error.
#[instrument(skip_all, fields(%cart_item_id))]
pub async fn remove(
    State(state): State<AppState>,
    ApiPath(cart_item_id): ApiPath<CartItemId>,
) -> Result<Json<MessageResponse>> {
    let removed = state.store().delete_cart_item(cart_item_id).await?;
    tracing::debug!(removed, "Cart item removed");

    Ok(Json(MessageResponse {
        message: "Item removed from cart",
    }))
}

/// Empty the user's cart.
///
/// POST /api/checkout
///
/// No order is recorded and no payment is taken.
#[instrument(skip_all, fields(user_id = ?req.user_id))]
pub async fn checkout(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>> {
    let Some(user_id) = req.user_id else {
        return Err(AppError::validation("user_id is required"));
    };

    let items_removed = state.store().clear_cart(user_id).await?;
    tracing::info!(%user_id, items_removed, "Checkout completed");

    Ok(Json(CheckoutResponse {
        message: "Checkout successful",
        items_removed,
    }))
}
