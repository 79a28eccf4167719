// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Order placement and cancellation.
//!
//! An order is an open cart flipped to `ordered` with stock deducted in the
//! same transaction. Stock is re-checked at placement through a conditional
//! update, so a cart that was fine when filled can still fail here if
//! someone else ordered the remaining copies in between.

use bookstore_core::{BookId, CartId, CartWithItems, UserId, now_secs};
use rusqlite::params;
use tracing::instrument;

use crate::{
	Store, StoreError,
	cart::{load_cart_with_items, load_items},
};

impl Store {
	/// Turn the open cart into an order, deducting every item's quantity
	/// from the book's stock. Fails with `OutOfStock` if any item can no
	/// longer be covered; nothing is deducted in that case.
	#[instrument(name = "store::order::place", level = "debug", skip(self), fields(user = %user, cart = %cart))]
	pub fn place_order(&self, user: UserId, cart: CartId) -> Result<CartWithItems, StoreError> {
		let mut conn = self.conn();
		let tx = conn.transaction()?;

		let open: bool = tx.query_row(
			"SELECT COUNT(*) > 0 FROM carts WHERE id = ?1 AND user_id = ?2 AND ordered = 0",
			params![cart.0, user.0],
			|row| row.get(0),
		)?;
		if !open {
			return Err(StoreError::CartNotFound(cart));
		}

		for item in load_items(&tx, cart)? {
			let deducted = tx.execute(
				"UPDATE books SET quantity = quantity - ?2 WHERE id = ?1 AND quantity >= ?2",
				params![item.book_id.0, item.quantity],
			)?;
			if deducted == 0 {
				let available: u32 = match tx.query_row(
					"SELECT quantity FROM books WHERE id = ?1",
					params![item.book_id.0],
					|row| row.get(0),
				) {
					Ok(quantity) => quantity,
					Err(rusqlite::Error::QueryReturnedNoRows) => {
						return Err(StoreError::BookNotFound(item.book_id));
					}
					Err(e) => return Err(e.into()),
				};
				return Err(StoreError::OutOfStock {
					book: item.book_id,
					requested: item.quantity,
					available,
				});
			}
		}

		tx.execute(
			"UPDATE carts SET ordered = 1, ordered_at = ?2 WHERE id = ?1",
			params![cart.0, now_secs()],
		)?;

		let result = load_cart_with_items(&tx, cart)?;
		tx.commit()?;
		Ok(result)
	}

	/// All of the user's placed orders, newest first.
	#[instrument(name = "store::order::list", level = "trace", skip(self))]
	pub fn list_orders(&self, user: UserId) -> Result<Vec<CartWithItems>, StoreError> {
		let conn = self.conn();
		let carts = {
			let mut stmt = conn.prepare(
				"SELECT id, user_id, ordered, ordered_at, total_price, total_quantity, created_at \
				 FROM carts WHERE user_id = ?1 AND ordered = 1 ORDER BY id DESC",
			)?;
			let rows = stmt.query_map(params![user.0], crate::cart::cart_from_row)?;
			rows.collect::<rusqlite::Result<Vec<_>>>()?
		};
		let mut orders = Vec::with_capacity(carts.len());
		for cart in carts {
			let items = load_items(&conn, cart.id)?;
			orders.push(CartWithItems {
				cart,
				items,
			});
		}
		Ok(orders)
	}

	/// Cancel a placed order, restoring every surviving book's stock, and
	/// drop the cart. Items whose book was deleted after placement have no
	/// stock left to restore.
	#[instrument(name = "store::order::cancel", level = "debug", skip(self), fields(user = %user, cart = %cart))]
	pub fn cancel_order(&self, user: UserId, cart: CartId) -> Result<(), StoreError> {
		let mut conn = self.conn();
		let tx = conn.transaction()?;

		let placed: bool = tx.query_row(
			"SELECT COUNT(*) > 0 FROM carts WHERE id = ?1 AND user_id = ?2 AND ordered = 1",
			params![cart.0, user.0],
			|row| row.get(0),
		)?;
		if !placed {
			return Err(StoreError::OrderNotFound(cart));
		}

		for item in load_items(&tx, cart)? {
			tx.execute(
				"UPDATE books SET quantity = quantity + ?2 WHERE id = ?1",
				params![item.book_id.0, item.quantity],
			)?;
		}
		tx.execute("DELETE FROM carts WHERE id = ?1", params![cart.0])?;

		tx.commit()?;
		Ok(())
	}

	/// Stock remaining for a book.
	#[instrument(name = "store::order::stock", level = "trace", skip(self))]
	pub fn book_stock(&self, book: BookId) -> Result<u32, StoreError> {
		let conn = self.conn();
		match conn.query_row("SELECT quantity FROM books WHERE id = ?1", params![book.0], |row| row.get(0)) {
			Ok(quantity) => Ok(quantity),
			Err(rusqlite::Error::QueryReturnedNoRows) => Err(StoreError::BookNotFound(book)),
			Err(e) => Err(e.into()),
		}
	}
}
