// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use bookstore_core::{BookId, CartId, UserId};

/// Storage level failures. The HTTP layer maps these onto status codes and
/// stable error codes.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
	#[error("username already exists")]
	DuplicateUsername,
	#[error("email already registered")]
	DuplicateEmail,
	#[error("user {0} not found")]
	UserNotFound(UserId),
	#[error("book {0} not found")]
	BookNotFound(BookId),
	#[error("cart {0} not found")]
	CartNotFound(CartId),
	#[error("no open cart")]
	NoOpenCart,
	#[error("order {0} not found")]
	OrderNotFound(CartId),
	#[error("book {book} is out of stock (requested {requested}, available {available})")]
	OutOfStock {
		book: BookId,
		requested: u32,
		available: u32,
	},
	#[error(transparent)]
	Sqlite(#[from] rusqlite::Error),
}
