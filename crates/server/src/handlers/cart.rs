// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Open-cart endpoints. The cart is addressed implicitly: every user has
//! at most one open cart, created by the first item added to it.

use axum::{
	Json,
	extract::{Path, State},
	http::{HeaderMap, StatusCode},
};
use bookstore_core::{BookId, CartId, CartWithItems};
use bookstore_store::StoreError;
use serde::{Deserialize, Serialize};

use crate::{
	error::AppError,
	extract::{AppJson, require_user},
	handlers::MessageResponse,
	state::AppState,
};

/// Request body for putting a book into the cart.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
	pub book_id: u64,
	/// Desired quantity. Replaces the current value if the book is
	/// already in the cart.
	pub quantity: u32,
}

/// Response body carrying a cart with its items.
#[derive(Debug, Serialize)]
pub struct CartResponse {
	pub cart: CartWithItems,
}

/// The caller's open cart.
///
/// # Response
///
/// ```json
/// {
///   "cart": {
///     "id": 1, "user_id": 1, "ordered": false, "ordered_at": null,
///     "total_price": 40, "total_quantity": 2, "created_at": 1735689600,
///     "items": [{"id": 1, "cart_id": 1, "book_id": 1, "unit_price": 20, "quantity": 2}]
///   }
/// }
/// ```
///
/// `404 CART_NOT_FOUND` when nothing has been added yet.
pub async fn show(
	State(state): State<AppState>,
	headers: HeaderMap,
) -> Result<Json<CartResponse>, AppError> {
	let user = require_user(&state, &headers).await?;
	let cart = state
		.with_store(move |store| store.open_cart(user.id))
		.await?
		.ok_or(AppError::Store(StoreError::NoOpenCart))?;
	Ok(Json(CartResponse {
		cart,
	}))
}

/// Put a book into the open cart, creating the cart on first use.
///
/// The requested quantity must be covered by the book's current stock,
/// otherwise `409 OUT_OF_STOCK`.
///
/// # Request Body
///
/// ```json
/// {"book_id": 1, "quantity": 2}
/// ```
pub async fn add_item(
	State(state): State<AppState>,
	headers: HeaderMap,
	AppJson(request): AppJson<AddItemRequest>,
) -> Result<(StatusCode, Json<CartResponse>), AppError> {
	let user = require_user(&state, &headers).await?;
	if request.quantity == 0 {
		return Err(AppError::BadRequest("quantity must be at least 1".to_string()));
	}
	let cart: CartWithItems = state
		.with_store(move |store| store.add_to_cart(user.id, BookId(request.book_id), request.quantity))
		.await?;
	Ok((StatusCode::CREATED, Json(CartResponse {
		cart,
	})))
}

/// Drop one of the caller's open carts. Ordered carts are cancelled via
/// the orders endpoint instead, so stock is restored first.
pub async fn delete(
	State(state): State<AppState>,
	Path(id): Path<u64>,
	headers: HeaderMap,
) -> Result<Json<MessageResponse>, AppError> {
	let user = require_user(&state, &headers).await?;
	state.with_store(move |store| store.delete_cart(user.id, CartId(id))).await?;
	Ok(Json(MessageResponse::new("Cart deleted")))
}
