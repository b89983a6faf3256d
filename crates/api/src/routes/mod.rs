//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                  - Liveness check
//! GET    /health/ready            - Readiness check (store reachable)
//!
//! # Accounts
//! POST   /api/signup              - Create account
//! POST   /api/login               - Check credentials, return profile
//!
//! # Catalog
//! GET    /api/plants              - List plants (?category= exact match)
//! POST   /api/plants              - Add plant
//!
//! # Favorites
//! GET    /api/favorites/{user_id} - Favorited plants
//! POST   /api/favorites           - Add favorite
//! DELETE /api/favorites           - Remove favorite
//!
//! # Cart
//! GET    /api/cart/{user_id}      - Cart lines
//! POST   /api/cart                - Add or merge line
//! DELETE /api/cart/{cart_item_id} - Remove line
//! POST   /api/checkout            - Clear cart
//! ```

pub mod auth;
pub mod cart;
pub mod extract;
pub mod favorites;
pub mod health;
pub mod plants;

use axum::{
    Router,
    routing::{get, post},
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Plain acknowledgement body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Create the JSON API routes (mounted under `/api`).
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/plants", get(plants::index).post(plants::create))
        .route(
            "/favorites",
            post(favorites::add).delete(favorites::remove),
        )
        .route("/favorites/{user_id}", get(favorites::index))
        .route("/cart", post(cart::add))
        // GET takes a user ID, DELETE a cart row ID.
        .route("/cart/{id}", get(cart::index).delete(cart::remove))
        .route("/checkout", post(cart::checkout))
}

/// Build the complete application with request tracing and CORS.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api", api_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
