// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! HTTP API for the bookstore.
//!
//! This crate provides the axum router, the handlers behind it and the
//! shared application state. Authentication is a bearer token issued at
//! login; store access runs on the blocking pool so sqlite never stalls
//! the runtime.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check (no authentication required)
//! - `POST /v1/auth/register` - Create an account and mail a verification link
//! - `GET /v1/auth/verify` - Confirm an account from the mailed link
//! - `POST /v1/auth/login` - Exchange credentials for an access token
//! - `POST /v1/auth/reset` - Request a password reset mail
//! - `POST /v1/auth/password` - Set a new password from the mailed link
//! - `GET/POST /v1/books`, `PUT/DELETE /v1/books/{id}` - Catalog
//! - `GET /v1/cart`, `POST /v1/cart/items`, `DELETE /v1/cart/{id}` - Open cart
//! - `GET/POST /v1/orders`, `DELETE /v1/orders/{id}` - Orders

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::Config;
pub use error::{AppError, ErrorResponse};
pub use routes::router;
pub use state::AppState;
