//! Signup and login handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use plant_shop_core::UserId;

use super::extract::{ApiJson, present};
use crate::error::{AppError, Result, set_sentry_user};
use crate::models::UserProfile;
use crate::services::{AuthService, Registration};
use crate::state::AppState;

/// Signup request body.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: Option<String>,
}

/// Signup response body.
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: &'static str,
    pub user_id: UserId,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login response body.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub user: UserProfile,
}

/// Create an account.
///
/// POST /api/signup
#[instrument(skip_all)]
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>)> {
    let (Some(full_name), Some(email), Some(password), Some(confirm_password)) = (
        present(req.full_name),
        present(req.email),
        present(req.password),
        present(req.confirm_password),
    ) else {
        return Err(AppError::validation(
            "full_name, email, password and confirmPassword are required",
        ));
    };

    let user_id = AuthService::new(state.store())
        .register(Registration {
            full_name,
            email,
            phone: present(req.phone),
            password,
            confirm_password,
        })
        .await?;

    tracing::info!(%user_id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User registered successfully",
            user_id,
        }),
    ))
}

/// Check credentials and return the user's public profile.
///
/// POST /api/login
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let (Some(email), Some(password)) = (present(req.email), present(req.password)) else {
        return Err(AppError::validation("email and password are required"));
    };

    let user = AuthService::new(state.store())
        .login(&email, password)
        .await?;

    set_sentry_user(&user.id, Some(user.email.as_str()));
    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(LoginResponse {
        message: "Login successful",
        user,
    }))
}
