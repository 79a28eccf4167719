// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! HTTP error handling and response formatting.
//!
//! Every failure a handler can produce converges on [`AppError`], which
//! implements `IntoResponse` so all endpoints answer with the same
//! `{ "error": ..., "code": ... }` JSON body and a stable code.

use axum::{
	Json,
	extract::rejection::JsonRejection,
	http::StatusCode,
	response::{IntoResponse, Response},
};
use bookstore_auth::AuthError;
use bookstore_core::ValidationError;
use bookstore_mail::MailError;
use bookstore_store::StoreError;
use serde::Serialize;

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
	/// Human-readable error message.
	pub error: String,
	/// Machine-readable error code.
	pub code: String,
}

impl ErrorResponse {
	pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
		Self {
			code: code.into(),
			error: error.into(),
		}
	}
}

/// Application error type that converts to HTTP responses.
#[derive(Debug)]
pub enum AppError {
	/// Authentication or token error.
	Auth(AuthError),
	/// A request field failed validation.
	Validation(ValidationError),
	/// Storage error.
	Store(StoreError),
	/// Outgoing mail error.
	Mail(MailError),
	/// Authenticated but not allowed.
	Forbidden,
	/// Password reset requested for an unknown email.
	EmailNotFound,
	/// Request parsing error.
	BadRequest(String),
	/// Internal server error.
	Internal(String),
}

impl From<AuthError> for AppError {
	fn from(e: AuthError) -> Self {
		AppError::Auth(e)
	}
}

impl From<ValidationError> for AppError {
	fn from(e: ValidationError) -> Self {
		AppError::Validation(e)
	}
}

impl From<StoreError> for AppError {
	fn from(e: StoreError) -> Self {
		AppError::Store(e)
	}
}

impl From<MailError> for AppError {
	fn from(e: MailError) -> Self {
		AppError::Mail(e)
	}
}

impl From<JsonRejection> for AppError {
	fn from(rejection: JsonRejection) -> Self {
		AppError::BadRequest(rejection.body_text())
	}
}

impl std::fmt::Display for AppError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			AppError::Auth(e) => write!(f, "Authentication error: {}", e),
			AppError::Validation(e) => write!(f, "Validation error: {}", e),
			AppError::Store(e) => write!(f, "Store error: {}", e),
			AppError::Mail(e) => write!(f, "Mail error: {}", e),
			AppError::Forbidden => write!(f, "Forbidden"),
			AppError::EmailNotFound => write!(f, "Email not found"),
			AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
			AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
		}
	}
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
	fn into_response(self) -> Response {
		let (status, code, message) = match &self {
			AppError::Auth(AuthError::MissingCredentials) => {
				(StatusCode::UNAUTHORIZED, "AUTH_REQUIRED", "Authentication required")
			}
			AppError::Auth(AuthError::InvalidHeader) => {
				(StatusCode::BAD_REQUEST, "INVALID_HEADER", "Malformed authorization header")
			}
			// a token with the wrong purpose is treated as invalid, the
			// caller learns nothing about what the token was for
			AppError::Auth(AuthError::InvalidToken) | AppError::Auth(AuthError::WrongPurpose) => {
				(StatusCode::UNAUTHORIZED, "INVALID_TOKEN", "Invalid authentication token")
			}
			AppError::Auth(AuthError::Expired) => {
				(StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED", "Authentication token expired")
			}
			AppError::Auth(AuthError::InvalidCredentials) => {
				(StatusCode::BAD_REQUEST, "INVALID_CREDENTIALS", "Invalid username or password")
			}
			AppError::Auth(e @ (AuthError::InvalidKey | AuthError::Encoding(_) | AuthError::Hash(_))) => {
				tracing::error!("Auth failure: {}", e);
				(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", "Internal server error")
			}
			AppError::Validation(e) => {
				let body = Json(ErrorResponse::new("VALIDATION", e.to_string()));
				return (StatusCode::BAD_REQUEST, body).into_response();
			}
			AppError::Store(StoreError::DuplicateUsername) => {
				(StatusCode::BAD_REQUEST, "DUPLICATE_USERNAME", "Username is already taken")
			}
			AppError::Store(StoreError::DuplicateEmail) => {
				(StatusCode::BAD_REQUEST, "DUPLICATE_EMAIL", "Email is already registered")
			}
			AppError::Store(StoreError::UserNotFound(_)) => {
				(StatusCode::NOT_FOUND, "USER_NOT_FOUND", "User not found")
			}
			AppError::Store(StoreError::BookNotFound(_)) => {
				(StatusCode::NOT_FOUND, "BOOK_NOT_FOUND", "Book not found")
			}
			AppError::Store(StoreError::CartNotFound(_) | StoreError::NoOpenCart) => {
				(StatusCode::NOT_FOUND, "CART_NOT_FOUND", "Cart not found")
			}
			AppError::Store(StoreError::OrderNotFound(_)) => {
				(StatusCode::NOT_FOUND, "ORDER_NOT_FOUND", "Order not found")
			}
			AppError::Store(e @ StoreError::OutOfStock { .. }) => {
				let body = Json(ErrorResponse::new("OUT_OF_STOCK", e.to_string()));
				return (StatusCode::CONFLICT, body).into_response();
			}
			AppError::Store(StoreError::Sqlite(e)) => {
				tracing::error!("Storage failure: {}", e);
				(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", "Internal server error")
			}
			AppError::Mail(e) => {
				tracing::error!("Mail failure: {}", e);
				(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", "Internal server error")
			}
			AppError::Forbidden => (
				StatusCode::FORBIDDEN,
				"FORBIDDEN",
				"Insufficient permissions for this operation",
			),
			AppError::EmailNotFound => {
				(StatusCode::NOT_FOUND, "USER_NOT_FOUND", "No account with this email")
			}
			AppError::BadRequest(msg) => {
				let body = Json(ErrorResponse::new("BAD_REQUEST", msg.clone()));
				return (StatusCode::BAD_REQUEST, body).into_response();
			}
			AppError::Internal(msg) => {
				tracing::error!("Internal error: {}", msg);
				(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", "Internal server error")
			}
		};

		let body = Json(ErrorResponse::new(code, message));
		(status, body).into_response()
	}
}

#[cfg(test)]
mod tests {
	use bookstore_core::BookId;

	use super::*;

	#[test]
	fn test_error_response_serialization() {
		let resp = ErrorResponse::new("TEST_CODE", "Test error message");
		let json = serde_json::to_string(&resp).unwrap();
		assert!(json.contains("TEST_CODE"));
		assert!(json.contains("Test error message"));
	}

	#[test]
	fn test_app_error_display() {
		let err = AppError::BadRequest("Invalid JSON".to_string());
		assert_eq!(err.to_string(), "Bad request: Invalid JSON");
	}

	#[test]
	fn test_status_codes() {
		let cases = [
			(AppError::Auth(AuthError::MissingCredentials), StatusCode::UNAUTHORIZED),
			(AppError::Auth(AuthError::WrongPurpose), StatusCode::UNAUTHORIZED),
			(AppError::Auth(AuthError::InvalidCredentials), StatusCode::BAD_REQUEST),
			(AppError::Store(StoreError::DuplicateUsername), StatusCode::BAD_REQUEST),
			(AppError::Store(StoreError::NoOpenCart), StatusCode::NOT_FOUND),
			(
				AppError::Store(StoreError::OutOfStock {
					book: BookId(1),
					requested: 5,
					available: 2,
				}),
				StatusCode::CONFLICT,
			),
			(AppError::Forbidden, StatusCode::FORBIDDEN),
			(AppError::EmailNotFound, StatusCode::NOT_FOUND),
		];
		for (err, expected) in cases {
			assert_eq!(err.into_response().status(), expected);
		}
	}

	#[test]
	fn test_out_of_stock_keeps_the_numbers() {
		let err = AppError::Store(StoreError::OutOfStock {
			book: BookId(7),
			requested: 5,
			available: 2,
		});
		assert!(err.to_string().contains("requested 5"));
	}
}
