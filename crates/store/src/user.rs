// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use bookstore_core::{NewUser, User, UserId, now_secs};
use rusqlite::{Row, params};
use tracing::instrument;

use crate::{Store, StoreError};

const USER_COLUMNS: &str = "id, username, email, password_hash, superuser, verified, created_at";

pub(crate) fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
	Ok(User {
		id: UserId(row.get(0)?),
		username: row.get(1)?,
		email: row.get(2)?,
		password_hash: row.get(3)?,
		superuser: row.get(4)?,
		verified: row.get(5)?,
		created_at: row.get(6)?,
	})
}

impl Store {
	/// Create a user. Duplicate usernames and emails are reported as
	/// distinct errors so registration can tell the caller which field to
	/// fix.
	#[instrument(name = "store::user::create", level = "debug", skip(self, new), fields(username = %new.username))]
	pub fn create_user(&self, new: NewUser) -> Result<User, StoreError> {
		let created_at = now_secs();
		let conn = self.conn();

		let taken: bool = conn.query_row(
			"SELECT COUNT(*) > 0 FROM users WHERE username = ?1",
			params![new.username],
			|row| row.get(0),
		)?;
		if taken {
			return Err(StoreError::DuplicateUsername);
		}
		let taken: bool = conn.query_row(
			"SELECT COUNT(*) > 0 FROM users WHERE email = ?1",
			params![new.email],
			|row| row.get(0),
		)?;
		if taken {
			return Err(StoreError::DuplicateEmail);
		}

		conn.execute(
			"INSERT INTO users (username, email, password_hash, superuser, verified, created_at) \
			 VALUES (?1, ?2, ?3, ?4, 0, ?5)",
			params![new.username, new.email, new.password_hash, new.superuser, created_at],
		)?;
		let id = UserId(conn.last_insert_rowid() as u64);

		Ok(User {
			id,
			username: new.username,
			email: new.email,
			password_hash: new.password_hash,
			superuser: new.superuser,
			verified: false,
			created_at,
		})
	}

	#[instrument(name = "store::user::find", level = "trace", skip(self))]
	pub fn find_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
		let conn = self.conn();
		let result = conn.query_row(
			&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
			params![id.0],
			user_from_row,
		);
		match result {
			Ok(user) => Ok(Some(user)),
			Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
			Err(e) => Err(e.into()),
		}
	}

	#[instrument(name = "store::user::find_by_username", level = "trace", skip(self))]
	pub fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
		let conn = self.conn();
		let result = conn.query_row(
			&format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1"),
			params![username],
			user_from_row,
		);
		match result {
			Ok(user) => Ok(Some(user)),
			Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
			Err(e) => Err(e.into()),
		}
	}

	#[instrument(name = "store::user::find_by_email", level = "trace", skip(self))]
	pub fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
		let conn = self.conn();
		let result = conn.query_row(
			&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"),
			params![email],
			user_from_row,
		);
		match result {
			Ok(user) => Ok(Some(user)),
			Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
			Err(e) => Err(e.into()),
		}
	}

	#[instrument(name = "store::user::mark_verified", level = "debug", skip(self))]
	pub fn mark_verified(&self, id: UserId) -> Result<(), StoreError> {
		let conn = self.conn();
		let changed = conn.execute("UPDATE users SET verified = 1 WHERE id = ?1", params![id.0])?;
		if changed == 0 {
			return Err(StoreError::UserNotFound(id));
		}
		Ok(())
	}

	#[instrument(name = "store::user::set_password", level = "debug", skip(self, password_hash))]
	pub fn set_password(&self, id: UserId, password_hash: &str) -> Result<(), StoreError> {
		let conn = self.conn();
		let changed = conn.execute(
			"UPDATE users SET password_hash = ?2 WHERE id = ?1",
			params![id.0, password_hash],
		)?;
		if changed == 0 {
			return Err(StoreError::UserNotFound(id));
		}
		Ok(())
	}
}
