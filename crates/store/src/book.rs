// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use bookstore_core::{Book, BookId, BookUpdate, CartId, NewBook, UserId};
use rusqlite::{Row, params};
use tracing::instrument;

use crate::{Store, StoreError, cart::refresh_totals};

const BOOK_COLUMNS: &str = "id, title, author, price, quantity, added_by";

pub(crate) fn book_from_row(row: &Row<'_>) -> rusqlite::Result<Book> {
	Ok(Book {
		id: BookId(row.get(0)?),
		title: row.get(1)?,
		author: row.get(2)?,
		price: row.get(3)?,
		quantity: row.get(4)?,
		added_by: UserId(row.get(5)?),
	})
}

impl Store {
	#[instrument(name = "store::book::create", level = "debug", skip(self, new), fields(title = %new.title))]
	pub fn create_book(&self, new: NewBook) -> Result<Book, StoreError> {
		let conn = self.conn();
		conn.execute(
			"INSERT INTO books (title, author, price, quantity, added_by) VALUES (?1, ?2, ?3, ?4, ?5)",
			params![new.title, new.author, new.price, new.quantity, new.added_by.0],
		)?;
		let id = BookId(conn.last_insert_rowid() as u64);
		Ok(Book {
			id,
			title: new.title,
			author: new.author,
			price: new.price,
			quantity: new.quantity,
			added_by: new.added_by,
		})
	}

	#[instrument(name = "store::book::list", level = "trace", skip(self))]
	pub fn list_books(&self) -> Result<Vec<Book>, StoreError> {
		let conn = self.conn();
		let mut stmt = conn.prepare(&format!("SELECT {BOOK_COLUMNS} FROM books ORDER BY id"))?;
		let rows = stmt.query_map([], book_from_row)?;
		rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
	}

	#[instrument(name = "store::book::find", level = "trace", skip(self))]
	pub fn find_book(&self, id: BookId) -> Result<Option<Book>, StoreError> {
		let conn = self.conn();
		let result = conn.query_row(
			&format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = ?1"),
			params![id.0],
			book_from_row,
		);
		match result {
			Ok(book) => Ok(Some(book)),
			Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
			Err(e) => Err(e.into()),
		}
	}

	/// Full replacement of title, author, price and quantity.
	#[instrument(name = "store::book::update", level = "debug", skip(self, update), fields(book = %id))]
	pub fn update_book(&self, id: BookId, update: BookUpdate) -> Result<Book, StoreError> {
		let conn = self.conn();
		let changed = conn.execute(
			"UPDATE books SET title = ?2, author = ?3, price = ?4, quantity = ?5 WHERE id = ?1",
			params![id.0, update.title, update.author, update.price, update.quantity],
		)?;
		if changed == 0 {
			return Err(StoreError::BookNotFound(id));
		}
		let book = conn.query_row(
			&format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = ?1"),
			params![id.0],
			book_from_row,
		)?;
		Ok(book)
	}

	/// Remove a book. Cart items referencing it are dropped by the cascade;
	/// open carts that lose an item get their totals recomputed in the same
	/// transaction.
	#[instrument(name = "store::book::delete", level = "debug", skip(self), fields(book = %id))]
	pub fn delete_book(&self, id: BookId) -> Result<(), StoreError> {
		let mut conn = self.conn();
		let tx = conn.transaction()?;

		let affected_carts: Vec<CartId> = {
			let mut stmt = tx.prepare(
				"SELECT DISTINCT c.id FROM carts c \
				 JOIN cart_items ci ON ci.cart_id = c.id \
				 WHERE ci.book_id = ?1 AND c.ordered = 0",
			)?;
			let rows = stmt.query_map(params![id.0], |row| row.get::<_, u64>(0).map(CartId))?;
			rows.collect::<rusqlite::Result<Vec<_>>>()?
		};

		let deleted = tx.execute("DELETE FROM books WHERE id = ?1", params![id.0])?;
		if deleted == 0 {
			return Err(StoreError::BookNotFound(id));
		}
		for cart in affected_carts {
			refresh_totals(&tx, cart)?;
		}

		tx.commit()?;
		Ok(())
	}
}
