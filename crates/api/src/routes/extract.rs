//! Request extractors whose rejections render as validation errors.
//!
//! axum's stock `Json`, `Path`, and `Query` extractors answer malformed input
//! with plain-text 415/422 responses. These wrappers route every rejection
//! through [`AppError::Validation`] so clients always get a 400 JSON body.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Typed path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// Typed query string.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// Treat an empty string the same as an absent field.
pub fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
