//! Favorites handlers.

use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::instrument;

use plant_shop_core::{PlantId, UserId};

use super::MessageResponse;
use super::extract::{ApiJson, ApiPath};
use crate::db::RepositoryError;
use crate::error::{AppError, Result};
use crate::models::Plant;
use crate::state::AppState;

/// Body for adding or removing a favorite.
#[derive(Debug, Deserialize)]
pub struct FavoriteRequest {
    pub user_id: Option<UserId>,
    pub plant_id: Option<PlantId>,
}

impl FavoriteRequest {
    fn into_pair(self) -> Result<(UserId, PlantId)> {
        match (self.user_id, self.plant_id) {
            (Some(user_id), Some(plant_id)) => Ok((user_id, plant_id)),
            _ => Err(AppError::validation("user_id and plant_id are required")),
        }
    }
}

/// Plants a user has favorited.
///
/// GET /api/favorites/{user_id}
#[instrument(skip_all, fields(%user_id))]
pub async fn index(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<UserId>,
) -> Result<Json<Vec<Plant>>> {
    let plants = state.store().list_favorite_plants(user_id).await?;
    Ok(Json(plants))
}

/// Mark a plant as favorite.
///
/// POST /api/favorites
///
/// The existence check and the insert are separate statements; two
/// concurrent requests for the same pair can both pass the check.
#[instrument(skip_all, fields(user_id = ?req.user_id, plant_id = ?req.plant_id))]
pub async fn add(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<FavoriteRequest>,
) -> Result<Json<MessageResponse>> {
    let (user_id, plant_id) = req.into_pair()?;
    let store = state.store();

    if store.favorite_exists(user_id, plant_id).await? {
        return Err(AppError::Conflict("Plant already in favorites".to_string()));
    }

    store
        .insert_favorite(user_id, plant_id)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => {
                AppError::Conflict("Plant already in favorites".to_string())
            }
            other => AppError::Storage(other),
        })?;

    Ok(Json(MessageResponse {
        message: "Added to favorites",
    }))
}

/// Remove a favorite. Succeeds whether or not the pair existed.
///
/// DELETE /api/favorites
#[instrument(skip_all, fields(user_id = ?req.user_id, plant_id = ?req.plant_id))]
pub async fn remove(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<FavoriteRequest>,
) -> Result<Json<MessageResponse>> {
    let (user_id, plant_id) = req.into_pair()?;
    let removed = state.store().delete_favorite(user_id, plant_id).await?;
    tracing::debug!(removed, "Favorite removed");

    Ok(Json(MessageResponse {
        message: "Removed from favorites",
    }))
}
