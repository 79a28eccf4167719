// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Request extraction helpers shared by the handlers.

use axum::{extract::FromRequest, http::HeaderMap};
use bookstore_auth::{AuthError, TokenPurpose};
use bookstore_core::User;

use crate::{error::AppError, state::AppState};

/// JSON body extractor whose rejection is an [`AppError`], so malformed
/// bodies produce the same error shape as everything else.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Pull the bearer token out of the `Authorization` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
	let header = headers.get("authorization").ok_or(AuthError::MissingCredentials)?;
	let value = header.to_str().map_err(|_| AuthError::InvalidHeader)?;
	value.strip_prefix("Bearer ").ok_or(AuthError::InvalidHeader)
}

/// Resolve the calling user from an access token. The account must still
/// exist; a token for a deleted user reads as invalid.
pub async fn require_user(state: &AppState, headers: &HeaderMap) -> Result<User, AppError> {
	let token = bearer_token(headers)?.to_string();
	let claims = state.tokens().verify(&token, TokenPurpose::Access)?;
	state.with_store(move |store| store.find_user(claims.user))
		.await?
		.ok_or(AppError::Auth(AuthError::InvalidToken))
}

/// Like [`require_user`], but only superusers pass.
pub async fn require_superuser(state: &AppState, headers: &HeaderMap) -> Result<User, AppError> {
	let user = require_user(state, headers).await?;
	if !user.superuser {
		return Err(AppError::Forbidden);
	}
	Ok(user)
}
