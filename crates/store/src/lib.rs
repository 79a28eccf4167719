// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! SQLite persistence for the bookstore.
//!
//! [`Store`] wraps a single connection behind a mutex and is cheap to clone;
//! the HTTP layer runs every call on a blocking thread. Multi-statement
//! operations (cart mutation, order placement and cancellation) run inside
//! one SQLite transaction, so a failed step never leaves half-applied
//! inventory changes behind.

pub mod book;
pub mod cart;
pub mod error;
pub mod order;
pub mod user;

use std::{path::Path, sync::Arc};

use parking_lot::{Mutex, MutexGuard};
use rusqlite::Connection;
use tracing::instrument;

pub use error::StoreError;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
	id            INTEGER PRIMARY KEY AUTOINCREMENT,
	username      TEXT NOT NULL UNIQUE,
	email         TEXT NOT NULL UNIQUE,
	password_hash TEXT NOT NULL,
	superuser     INTEGER NOT NULL DEFAULT 0,
	verified      INTEGER NOT NULL DEFAULT 0,
	created_at    INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS books (
	id       INTEGER PRIMARY KEY AUTOINCREMENT,
	title    TEXT NOT NULL,
	author   TEXT NOT NULL,
	price    INTEGER NOT NULL,
	quantity INTEGER NOT NULL,
	added_by INTEGER NOT NULL REFERENCES users(id)
);

CREATE TABLE IF NOT EXISTS carts (
	id             INTEGER PRIMARY KEY AUTOINCREMENT,
	user_id        INTEGER NOT NULL REFERENCES users(id),
	ordered        INTEGER NOT NULL DEFAULT 0,
	ordered_at     INTEGER,
	total_price    INTEGER NOT NULL DEFAULT 0,
	total_quantity INTEGER NOT NULL DEFAULT 0,
	created_at     INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS cart_items (
	id         INTEGER PRIMARY KEY AUTOINCREMENT,
	cart_id    INTEGER NOT NULL REFERENCES carts(id) ON DELETE CASCADE,
	book_id    INTEGER NOT NULL REFERENCES books(id) ON DELETE CASCADE,
	unit_price INTEGER NOT NULL,
	quantity   INTEGER NOT NULL,
	UNIQUE (cart_id, book_id)
);

CREATE INDEX IF NOT EXISTS idx_carts_user_ordered ON carts (user_id, ordered);
CREATE INDEX IF NOT EXISTS idx_cart_items_cart ON cart_items (cart_id);
CREATE INDEX IF NOT EXISTS idx_cart_items_book ON cart_items (book_id);
";

/// Handle to the bookstore database.
#[derive(Clone)]
pub struct Store {
	inner: Arc<StoreInner>,
}

struct StoreInner {
	conn: Mutex<Connection>,
}

impl Store {
	/// Open (and bootstrap, if needed) the database at `path`.
	#[instrument(name = "store::open", level = "info", skip_all)]
	pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
		let conn = Connection::open(path.as_ref())?;
		conn.pragma_update(None, "journal_mode", "WAL")?;
		conn.pragma_update(None, "synchronous", "NORMAL")?;
		Self::setup(conn)
	}

	/// In-memory store for tests.
	pub fn in_memory() -> Result<Self, StoreError> {
		Self::setup(Connection::open_in_memory()?)
	}

	fn setup(conn: Connection) -> Result<Self, StoreError> {
		conn.pragma_update(None, "foreign_keys", "ON")?;
		conn.execute_batch(SCHEMA)?;
		Ok(Self {
			inner: Arc::new(StoreInner {
				conn: Mutex::new(conn),
			}),
		})
	}

	pub(crate) fn conn(&self) -> MutexGuard<'_, Connection> {
		self.inner.conn.lock()
	}
}

#[cfg(test)]
mod tests {
	use bookstore_testing::temp_dir;

	use super::*;

	#[test]
	fn test_open_bootstraps_schema() {
		temp_dir(|dir| {
			let path = dir.join("bookstore.db");
			let store = Store::open(&path).unwrap();
			assert!(store.list_books().unwrap().is_empty());
			Ok(())
		})
		.unwrap();
	}

	#[test]
	fn test_reopen_keeps_data() {
		temp_dir(|dir| {
			let path = dir.join("bookstore.db");
			{
				let store = Store::open(&path).unwrap();
				store.create_user(bookstore_core::NewUser {
					username: "alice".to_string(),
					email: "alice@example.com".to_string(),
					password_hash: "hash".to_string(),
					superuser: false,
				})
				.unwrap();
			}
			let store = Store::open(&path).unwrap();
			let user = store.find_user_by_username("alice").unwrap();
			assert!(user.is_some());
			Ok(())
		})
		.unwrap();
	}
}
