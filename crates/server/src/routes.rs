// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Route table and middleware stack.

use std::time::Duration;

use axum::{
	Router,
	http::{Method, header},
	routing::{delete, get, post, put},
};
use tower_http::{cors::{Any, CorsLayer}, timeout::TimeoutLayer, trace::TraceLayer};

use crate::{handlers, state::AppState};

/// Build the application router with all routes and middleware.
pub fn router(state: AppState) -> Router {
	let cors = CorsLayer::new()
		.allow_origin(Any)
		.allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
		.allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
		.max_age(Duration::from_secs(3600));

	Router::new()
		.route("/health", get(handlers::health))
		.route("/v1/auth/register", post(handlers::auth::register))
		.route("/v1/auth/verify", get(handlers::auth::verify))
		.route("/v1/auth/login", post(handlers::auth::login))
		.route("/v1/auth/reset", post(handlers::auth::reset))
		.route("/v1/auth/password", post(handlers::auth::password))
		.route("/v1/books", get(handlers::book::list).post(handlers::book::create))
		.route("/v1/books/{id}", put(handlers::book::update).delete(handlers::book::delete))
		.route("/v1/cart", get(handlers::cart::show))
		.route("/v1/cart/items", post(handlers::cart::add_item))
		.route("/v1/cart/{id}", delete(handlers::cart::delete))
		.route("/v1/orders", get(handlers::order::list).post(handlers::order::place))
		.route("/v1/orders/{id}", delete(handlers::order::cancel))
		.layer(TimeoutLayer::new(Duration::from_secs(30)))
		.layer(TraceLayer::new_for_http())
		.layer(cors)
		.with_state(state)
}
