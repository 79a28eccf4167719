// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Order endpoints: place the open cart, list placed orders, cancel one.

use axum::{
	Json,
	extract::{Path, State},
	http::HeaderMap,
};
use bookstore_core::{CartId, CartWithItems};
use serde::{Deserialize, Serialize};

use crate::{
	error::AppError,
	extract::{AppJson, require_user},
	handlers::{MessageResponse, cart::CartResponse},
	state::AppState,
};

/// Request body for placing an order.
#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
	pub cart_id: u64,
}

/// Response body for the order listing.
#[derive(Debug, Serialize)]
pub struct OrdersResponse {
	pub orders: Vec<CartWithItems>,
}

/// Place an order for one of the caller's open carts.
///
/// Stock is re-checked and deducted in one transaction; a cart that was
/// fine when filled can still answer `409 OUT_OF_STOCK` here.
///
/// # Request Body
///
/// ```json
/// {"cart_id": 1}
/// ```
///
/// # Response
///
/// The ordered cart, `ordered` now true and `ordered_at` set.
pub async fn place(
	State(state): State<AppState>,
	headers: HeaderMap,
	AppJson(request): AppJson<PlaceOrderRequest>,
) -> Result<Json<CartResponse>, AppError> {
	let user = require_user(&state, &headers).await?;
	let cart = state
		.with_store(move |store| store.place_order(user.id, CartId(request.cart_id)))
		.await?;
	Ok(Json(CartResponse {
		cart,
	}))
}

/// The caller's placed orders, newest first.
pub async fn list(
	State(state): State<AppState>,
	headers: HeaderMap,
) -> Result<Json<OrdersResponse>, AppError> {
	let user = require_user(&state, &headers).await?;
	let orders = state.with_store(move |store| store.list_orders(user.id)).await?;
	Ok(Json(OrdersResponse {
		orders,
	}))
}

/// Cancel a placed order: every surviving book gets its stock back, then
/// the cart is dropped.
pub async fn cancel(
	State(state): State<AppState>,
	Path(id): Path<u64>,
	headers: HeaderMap,
) -> Result<Json<MessageResponse>, AppError> {
	let user = require_user(&state, &headers).await?;
	state.with_store(move |store| store.cancel_order(user.id, CartId(id))).await?;
	Ok(Json(MessageResponse::new("Order cancelled")))
}
