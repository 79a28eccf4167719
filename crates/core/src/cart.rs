// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use serde::Serialize;

use crate::id::{BookId, CartId, CartItemId, UserId};

/// A shopping cart. A user has at most one open (`ordered == false`) cart
/// in use at a time; placing the order flips `ordered` and stamps
/// `ordered_at`, after which the cart is part of the order history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cart {
	pub id: CartId,
	pub user_id: UserId,
	pub ordered: bool,
	pub ordered_at: Option<u64>,
	pub total_price: u64,
	pub total_quantity: u32,
	pub created_at: u64,
}

/// One book inside a cart.
///
/// `unit_price` is captured from the book when the item first enters the
/// cart; later price changes on the book do not affect it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartItem {
	pub id: CartItemId,
	pub cart_id: CartId,
	pub book_id: BookId,
	pub unit_price: u32,
	pub quantity: u32,
}

/// A cart together with its items, flattened for JSON responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartWithItems {
	#[serde(flatten)]
	pub cart: Cart,
	pub items: Vec<CartItem>,
}

impl CartWithItems {
	pub fn id(&self) -> CartId {
		self.cart.id
	}
}
