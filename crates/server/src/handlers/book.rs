// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Catalog endpoints. Reading and writing books requires a logged-in
//! account; deleting them requires a superuser.

use axum::{
	Json,
	extract::{Path, State},
	http::{HeaderMap, StatusCode},
};
use bookstore_core::{Book, BookId, BookUpdate, NewBook};
use serde::{Deserialize, Serialize};

use crate::{
	error::AppError,
	extract::{AppJson, require_superuser, require_user},
	handlers::MessageResponse,
	state::AppState,
};

/// Request body for creating or updating a book.
#[derive(Debug, Deserialize)]
pub struct BookRequest {
	pub title: String,
	pub author: String,
	/// Price in the smallest currency unit.
	pub price: u32,
	/// Copies in stock.
	pub quantity: u32,
}

/// Response body carrying a single book.
#[derive(Debug, Serialize)]
pub struct BookResponse {
	pub book: Book,
}

/// Response body for the catalog listing.
#[derive(Debug, Serialize)]
pub struct BooksResponse {
	pub books: Vec<Book>,
}

/// List the whole catalog.
///
/// # Response
///
/// ```json
/// {"books": [{"id": 1, "title": "...", "author": "...", "price": 20, "quantity": 15, "added_by": 1}]}
/// ```
pub async fn list(
	State(state): State<AppState>,
	headers: HeaderMap,
) -> Result<Json<BooksResponse>, AppError> {
	require_user(&state, &headers).await?;
	let books = state.with_store(|store| store.list_books()).await?;
	Ok(Json(BooksResponse {
		books,
	}))
}

/// Add a book to the catalog. The caller is recorded as `added_by`.
///
/// # Request Body
///
/// ```json
/// {"title": "Interstellar", "author": "Abhishek", "price": 20, "quantity": 15}
/// ```
pub async fn create(
	State(state): State<AppState>,
	headers: HeaderMap,
	AppJson(request): AppJson<BookRequest>,
) -> Result<(StatusCode, Json<BookResponse>), AppError> {
	let user = require_user(&state, &headers).await?;
	let new = NewBook {
		title: request.title,
		author: request.author,
		price: request.price,
		quantity: request.quantity,
		added_by: user.id,
	};
	let book = state.with_store(move |store| store.create_book(new)).await?;
	Ok((StatusCode::CREATED, Json(BookResponse {
		book,
	})))
}

/// Replace a book's fields. Unknown ids answer 404.
pub async fn update(
	State(state): State<AppState>,
	Path(id): Path<u64>,
	headers: HeaderMap,
	AppJson(request): AppJson<BookRequest>,
) -> Result<Json<BookResponse>, AppError> {
	require_user(&state, &headers).await?;
	let update = BookUpdate {
		title: request.title,
		author: request.author,
		price: request.price,
		quantity: request.quantity,
	};
	let book = state.with_store(move |store| store.update_book(BookId(id), update)).await?;
	Ok(Json(BookResponse {
		book,
	}))
}

/// Remove a book from the catalog. Superusers only; open carts holding the
/// book lose the item and have their totals recomputed.
pub async fn delete(
	State(state): State<AppState>,
	Path(id): Path<u64>,
	headers: HeaderMap,
) -> Result<Json<MessageResponse>, AppError> {
	require_superuser(&state, &headers).await?;
	state.with_store(move |store| store.delete_book(BookId(id))).await?;
	Ok(Json(MessageResponse::new("Book deleted")))
}
