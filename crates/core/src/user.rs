// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use serde::Serialize;

use crate::id::UserId;

/// A registered account.
///
/// Carries the argon2 password hash, so the struct itself is never made
/// serializable; [`UserView`] is the JSON projection.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
	pub id: UserId,
	pub username: String,
	pub email: String,
	pub password_hash: String,
	pub superuser: bool,
	pub verified: bool,
	/// Unix seconds.
	pub created_at: u64,
}

/// Input for creating a user row. The hash is produced by `bookstore-auth`
/// before this ever reaches the store.
#[derive(Debug, Clone)]
pub struct NewUser {
	pub username: String,
	pub email: String,
	pub password_hash: String,
	pub superuser: bool,
}

/// What the API exposes about a user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserView {
	pub id: UserId,
	pub username: String,
	pub email: String,
	pub superuser: bool,
	pub verified: bool,
	pub created_at: u64,
}

impl From<&User> for UserView {
	fn from(user: &User) -> Self {
		Self {
			id: user.id,
			username: user.username.clone(),
			email: user.email.clone(),
			superuser: user.superuser,
			verified: user.verified,
			created_at: user.created_at,
		}
	}
}
