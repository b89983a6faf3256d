//! Plant catalog types.

use serde::Serialize;

use plant_shop_core::{PlantId, Price};

/// A catalog entry from the `plants` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Plant {
    pub id: PlantId,
    pub name: String,
    pub price: Price,
    /// Image URL or asset reference.
    pub image: String,
    pub category: String,
}

/// Fields needed to add a plant to the catalog.
#[derive(Debug, Clone)]
pub struct NewPlant {
    pub name: String,
    pub price: Price,
    pub image: String,
    pub category: String,
}
