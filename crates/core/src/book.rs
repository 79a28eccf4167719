// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use serde::Serialize;

use crate::id::{BookId, UserId};

/// A book in the inventory.
///
/// Prices are whole currency units; `quantity` is the number of copies in
/// stock and is only ever adjusted through cart/order operations or a full
/// update by the user who manages the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Book {
	pub id: BookId,
	pub title: String,
	pub author: String,
	pub price: u32,
	pub quantity: u32,
	pub added_by: UserId,
}

/// Input for creating a book.
#[derive(Debug, Clone)]
pub struct NewBook {
	pub title: String,
	pub author: String,
	pub price: u32,
	pub quantity: u32,
	pub added_by: UserId,
}

/// Full replacement of the mutable book fields; `added_by` never changes.
#[derive(Debug, Clone)]
pub struct BookUpdate {
	pub title: String,
	pub author: String,
	pub price: u32,
	pub quantity: u32,
}
