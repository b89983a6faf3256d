//! Plant catalog handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use plant_shop_core::Price;

use super::extract::{ApiJson, ApiQuery, present};
use crate::error::{AppError, Result};
use crate::models::{NewPlant, Plant};
use crate::state::AppState;

/// Query string for the catalog listing.
#[derive(Debug, Deserialize)]
pub struct PlantFilter {
    pub category: Option<String>,
}

/// Add-plant request body.
#[derive(Debug, Deserialize)]
pub struct NewPlantRequest {
    pub name: Option<String>,
    pub price: Option<Price>,
    pub image: Option<String>,
    pub category: Option<String>,
}

/// Add-plant response body.
#[derive(Debug, Serialize)]
pub struct NewPlantResponse {
    pub message: &'static str,
    pub plant: Plant,
}

/// List the catalog, optionally filtered to one category.
///
/// GET /api/plants?category=
#[instrument(skip_all, fields(category = ?filter.category))]
pub async fn index(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<PlantFilter>,
) -> Result<Json<Vec<Plant>>> {
    let category = present(filter.category);
    let plants = state.store().list_plants(category.as_deref()).await?;
    Ok(Json(plants))
}

/// Add a plant to the catalog. Duplicates are allowed.
///
/// POST /api/plants
#[instrument(skip_all, fields(category = ?req.category))]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewPlantRequest>,
) -> Result<(StatusCode, Json<NewPlantResponse>)> {
    let (Some(name), Some(price), Some(image), Some(category)) = (
        present(req.name),
        req.price,
        present(req.image),
        present(req.category),
    ) else {
        return Err(AppError::validation(
            "name, price, image and category are required",
        ));
    };

    let plant = state
        .store()
        .insert_plant(&NewPlant {
            name,
            price,
            image,
            category,
        })
        .await?;

    tracing::info!(plant_id = %plant.id, "Plant added");

    Ok((
        StatusCode::CREATED,
        Json(NewPlantResponse {
            message: "Plant added successfully",
            plant,
        }),
    ))
}
