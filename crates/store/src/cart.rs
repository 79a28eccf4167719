// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Open-cart operations.
//!
//! Each user has at most one open cart in play; it is created on the first
//! `add_to_cart` and addressed implicitly from then on. Putting a book into
//! the cart that is already there replaces the quantity rather than adding
//! to it, and the unit price is the book's price at the time the item first
//! entered the cart.

use bookstore_core::{BookId, Cart, CartId, CartItem, CartItemId, CartWithItems, UserId, now_secs};
use rusqlite::{Connection, Row, params};
use tracing::instrument;

use crate::{Store, StoreError};

const CART_COLUMNS: &str = "id, user_id, ordered, ordered_at, total_price, total_quantity, created_at";

pub(crate) fn cart_from_row(row: &Row<'_>) -> rusqlite::Result<Cart> {
	Ok(Cart {
		id: CartId(row.get(0)?),
		user_id: UserId(row.get(1)?),
		ordered: row.get(2)?,
		ordered_at: row.get(3)?,
		total_price: row.get(4)?,
		total_quantity: row.get(5)?,
		created_at: row.get(6)?,
	})
}

fn item_from_row(row: &Row<'_>) -> rusqlite::Result<CartItem> {
	Ok(CartItem {
		id: CartItemId(row.get(0)?),
		cart_id: CartId(row.get(1)?),
		book_id: BookId(row.get(2)?),
		unit_price: row.get(3)?,
		quantity: row.get(4)?,
	})
}

pub(crate) fn load_items(conn: &Connection, cart: CartId) -> Result<Vec<CartItem>, StoreError> {
	let mut stmt = conn.prepare(
		"SELECT id, cart_id, book_id, unit_price, quantity FROM cart_items WHERE cart_id = ?1 ORDER BY id",
	)?;
	let rows = stmt.query_map(params![cart.0], item_from_row)?;
	rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
}

pub(crate) fn load_cart_with_items(conn: &Connection, cart: CartId) -> Result<CartWithItems, StoreError> {
	let loaded = match conn.query_row(
		&format!("SELECT {CART_COLUMNS} FROM carts WHERE id = ?1"),
		params![cart.0],
		cart_from_row,
	) {
		Ok(cart) => cart,
		Err(rusqlite::Error::QueryReturnedNoRows) => return Err(StoreError::CartNotFound(cart)),
		Err(e) => return Err(e.into()),
	};
	let items = load_items(conn, cart)?;
	Ok(CartWithItems {
		cart: loaded,
		items,
	})
}

/// Recompute the stored totals from the items. Runs after every mutation of
/// the cart's contents so `total_price == sum(unit_price * quantity)` holds.
pub(crate) fn refresh_totals(conn: &Connection, cart: CartId) -> Result<(), StoreError> {
	conn.execute(
		"UPDATE carts SET \
		 total_quantity = (SELECT COALESCE(SUM(quantity), 0) FROM cart_items WHERE cart_id = ?1), \
		 total_price = (SELECT COALESCE(SUM(unit_price * quantity), 0) FROM cart_items WHERE cart_id = ?1) \
		 WHERE id = ?1",
		params![cart.0],
	)?;
	Ok(())
}

impl Store {
	/// The user's open cart with its items, if one exists.
	#[instrument(name = "store::cart::open", level = "trace", skip(self))]
	pub fn open_cart(&self, user: UserId) -> Result<Option<CartWithItems>, StoreError> {
		let conn = self.conn();
		let cart = match conn.query_row(
			&format!("SELECT {CART_COLUMNS} FROM carts WHERE user_id = ?1 AND ordered = 0 ORDER BY id LIMIT 1"),
			params![user.0],
			cart_from_row,
		) {
			Ok(cart) => cart,
			Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
			Err(e) => return Err(e.into()),
		};
		let items = load_items(&conn, cart.id)?;
		Ok(Some(CartWithItems {
			cart,
			items,
		}))
	}

	/// Put `quantity` copies of a book into the user's open cart, creating
	/// the cart if necessary. If the book is already in the cart the
	/// quantity is replaced, not added. The book's current stock must cover
	/// the requested quantity.
	#[instrument(name = "store::cart::add", level = "debug", skip(self), fields(user = %user, book = %book))]
	pub fn add_to_cart(&self, user: UserId, book: BookId, quantity: u32) -> Result<CartWithItems, StoreError> {
		let mut conn = self.conn();
		let tx = conn.transaction()?;

		let (price, stock): (u32, u32) = match tx.query_row(
			"SELECT price, quantity FROM books WHERE id = ?1",
			params![book.0],
			|row| Ok((row.get(0)?, row.get(1)?)),
		) {
			Ok(found) => found,
			Err(rusqlite::Error::QueryReturnedNoRows) => return Err(StoreError::BookNotFound(book)),
			Err(e) => return Err(e.into()),
		};
		if stock < quantity {
			return Err(StoreError::OutOfStock {
				book,
				requested: quantity,
				available: stock,
			});
		}

		let cart = match tx.query_row(
			"SELECT id FROM carts WHERE user_id = ?1 AND ordered = 0 ORDER BY id LIMIT 1",
			params![user.0],
			|row| row.get::<_, u64>(0).map(CartId),
		) {
			Ok(id) => id,
			Err(rusqlite::Error::QueryReturnedNoRows) => {
				tx.execute(
					"INSERT INTO carts (user_id, ordered, total_price, total_quantity, created_at) \
					 VALUES (?1, 0, 0, 0, ?2)",
					params![user.0, now_secs()],
				)?;
				CartId(tx.last_insert_rowid() as u64)
			}
			Err(e) => return Err(e.into()),
		};

		let updated = tx.execute(
			"UPDATE cart_items SET quantity = ?3 WHERE cart_id = ?1 AND book_id = ?2",
			params![cart.0, book.0, quantity],
		)?;
		if updated == 0 {
			tx.execute(
				"INSERT INTO cart_items (cart_id, book_id, unit_price, quantity) VALUES (?1, ?2, ?3, ?4)",
				params![cart.0, book.0, price, quantity],
			)?;
		}
		refresh_totals(&tx, cart)?;

		let result = load_cart_with_items(&tx, cart)?;
		tx.commit()?;
		Ok(result)
	}

	/// Drop one of the user's open carts and its items. Ordered carts are
	/// deliberately excluded: cancelling an order restores stock first.
	#[instrument(name = "store::cart::delete", level = "debug", skip(self), fields(user = %user, cart = %cart))]
	pub fn delete_cart(&self, user: UserId, cart: CartId) -> Result<(), StoreError> {
		let conn = self.conn();
		let deleted = conn.execute(
			"DELETE FROM carts WHERE id = ?1 AND user_id = ?2 AND ordered = 0",
			params![cart.0, user.0],
		)?;
		if deleted == 0 {
			return Err(StoreError::CartNotFound(cart));
		}
		Ok(())
	}
}
