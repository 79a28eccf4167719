// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! HTTP endpoint handlers, grouped by resource.

pub mod auth;
pub mod book;
pub mod cart;
pub mod order;

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;

/// Acknowledgement body for endpoints with nothing else to return.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
	pub message: String,
}

impl MessageResponse {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
	pub status: &'static str,
}

/// Health check endpoint.
///
/// Returns 200 OK if the server is running.
/// This endpoint does not require authentication.
///
/// # Response
///
/// ```json
/// {"status": "ok"}
/// ```
pub async fn health() -> impl IntoResponse {
	(StatusCode::OK, Json(HealthResponse {
		status: "ok",
	}))
}
