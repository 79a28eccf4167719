// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Account lifecycle: registration, verification, login and password reset.
//!
//! Verification and reset never put a token in an HTTP response. The token
//! travels only inside the mailed link, and each one is minted for exactly
//! one of those flows.

use axum::{
	Json,
	extract::{Query, State},
	http::StatusCode,
};
use bookstore_auth::{AuthError, TokenPurpose};
use bookstore_core::{NewUser, User, UserView, validate};
use bookstore_mail::Message;
use serde::{Deserialize, Serialize};

use crate::{error::AppError, extract::AppJson, handlers::MessageResponse, state::AppState};

/// Request body for account registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
	pub username: String,
	pub email: String,
	pub password: String,
	/// Grants catalog administration. Defaults to a regular account.
	#[serde(default)]
	pub superuser: bool,
}

/// Response body for account registration.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
	pub user: UserView,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
	pub username: String,
	pub password: String,
}

/// Response body for login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
	pub token: String,
}

/// Request body for requesting a password reset mail.
#[derive(Debug, Deserialize)]
pub struct ResetRequest {
	pub email: String,
}

/// Request body for setting a new password from a reset link.
#[derive(Debug, Deserialize)]
pub struct PasswordRequest {
	pub new_password: String,
}

/// Token carried in the query string of mailed links.
#[derive(Debug, Deserialize)]
pub struct TokenQuery {
	pub token: Option<String>,
}

/// Create an account.
///
/// The username, email and password are validated, the password is hashed
/// with argon2 and a verification link is mailed to the given address.
///
/// # Request Body
///
/// ```json
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "Password1!",
///   "superuser": false
/// }
/// ```
///
/// # Response
///
/// `201 Created` with the stored user:
///
/// ```json
/// {
///   "user": {"id": 1, "username": "alice", "email": "alice@example.com", ...}
/// }
/// ```
pub async fn register(
	State(state): State<AppState>,
	AppJson(request): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
	validate::username(&request.username)?;
	validate::email(&request.email)?;
	validate::password(&request.password)?;

	let password_hash = hash_password(request.password).await?;
	let new = NewUser {
		username: request.username,
		email: request.email,
		password_hash,
		superuser: request.superuser,
	};
	let user = state.with_store(move |store| store.create_user(new)).await?;

	send_verification(&state, &user)?;

	Ok((StatusCode::CREATED, Json(RegisterResponse {
		user: UserView::from(&user),
	})))
}

/// Confirm an account from the mailed verification link.
///
/// # Response
///
/// ```json
/// {"message": "Account verified"}
/// ```
pub async fn verify(
	State(state): State<AppState>,
	Query(query): Query<TokenQuery>,
) -> Result<Json<MessageResponse>, AppError> {
	let token = query.token.ok_or_else(|| AppError::BadRequest("missing token".to_string()))?;
	let claims = state.tokens().verify(&token, TokenPurpose::Verify)?;
	state.with_store(move |store| store.mark_verified(claims.user)).await?;
	Ok(Json(MessageResponse::new("Account verified")))
}

/// Exchange credentials for an access token.
///
/// Unknown usernames and wrong passwords are indistinguishable to the
/// caller.
///
/// # Request Body
///
/// ```json
/// {"username": "alice", "password": "Password1!"}
/// ```
///
/// # Response
///
/// ```json
/// {"token": "..."}
/// ```
pub async fn login(
	State(state): State<AppState>,
	AppJson(request): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
	let username = request.username;
	let user = state
		.with_store(move |store| store.find_user_by_username(&username))
		.await?
		.ok_or(AppError::Auth(AuthError::InvalidCredentials))?;

	verify_password(request.password, user.password_hash.clone()).await?;

	let token = state.tokens().issue(user.id, TokenPurpose::Access, state.config().access_ttl)?;
	Ok(Json(LoginResponse {
		token,
	}))
}

/// Request a password reset mail.
///
/// # Request Body
///
/// ```json
/// {"email": "alice@example.com"}
/// ```
///
/// # Response
///
/// `200` with a message; `404` when no account uses the address.
pub async fn reset(
	State(state): State<AppState>,
	AppJson(request): AppJson<ResetRequest>,
) -> Result<Json<MessageResponse>, AppError> {
	let email = request.email;
	let user = state
		.with_store(move |store| store.find_user_by_email(&email))
		.await?
		.ok_or(AppError::EmailNotFound)?;

	send_reset(&state, &user)?;
	Ok(Json(MessageResponse::new("Password reset mail sent")))
}

/// Set a new password from the mailed reset link.
///
/// The token arrives in the query string; the new password is validated
/// like at registration.
///
/// # Request Body
///
/// ```json
/// {"new_password": "Password2!"}
/// ```
pub async fn password(
	State(state): State<AppState>,
	Query(query): Query<TokenQuery>,
	AppJson(request): AppJson<PasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
	let token = query.token.ok_or_else(|| AppError::BadRequest("missing token".to_string()))?;
	let claims = state.tokens().verify(&token, TokenPurpose::Reset)?;

	validate::password(&request.new_password)?;
	let password_hash = hash_password(request.new_password).await?;
	state.with_store(move |store| store.set_password(claims.user, &password_hash)).await?;
	Ok(Json(MessageResponse::new("Password updated")))
}

fn send_verification(state: &AppState, user: &User) -> Result<(), AppError> {
	let ttl = state.config().verify_ttl;
	let token = state.tokens().issue(user.id, TokenPurpose::Verify, ttl)?;
	let link = format!("{}/v1/auth/verify?token={}", state.config().base_url, token);
	state.mailer().send(Message {
		to: user.email.clone(),
		subject: "Verify your bookstore account".to_string(),
		body: format!(
			"Hi {},\n\nConfirm your address by opening:\n\n  {}\n\nThe link expires in {} minutes.\n",
			user.username,
			link,
			ttl.as_secs() / 60
		),
	})?;
	Ok(())
}

fn send_reset(state: &AppState, user: &User) -> Result<(), AppError> {
	let ttl = state.config().reset_ttl;
	let token = state.tokens().issue(user.id, TokenPurpose::Reset, ttl)?;
	let link = format!("{}/v1/auth/password?token={}", state.config().base_url, token);
	state.mailer().send(Message {
		to: user.email.clone(),
		subject: "Reset your bookstore password".to_string(),
		body: format!(
			"Hi {},\n\nSet a new password by opening:\n\n  {}\n\nThe link expires in {} minutes.\n",
			user.username,
			link,
			ttl.as_secs() / 60
		),
	})?;
	Ok(())
}

// argon2 is deliberately slow, keep it off the async workers
async fn hash_password(password: String) -> Result<String, AppError> {
	tokio::task::spawn_blocking(move || bookstore_auth::password::hash(&password))
		.await
		.map_err(|e| AppError::Internal(format!("password task panicked: {e}")))?
		.map_err(AppError::from)
}

async fn verify_password(password: String, stored: String) -> Result<(), AppError> {
	tokio::task::spawn_blocking(move || bookstore_auth::password::verify(&password, &stored))
		.await
		.map_err(|e| AppError::Internal(format!("password task panicked: {e}")))?
		.map_err(AppError::from)
}
