// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! End-to-end tests driving the full router the way a client would,
//! including the mailed verification and reset links.

use std::{sync::Arc, time::Duration};

use axum::{
	Router,
	body::Body,
	http::{Request, StatusCode, header},
};
use bookstore_auth::TokenSigner;
use bookstore_mail::MemoryMailer;
use bookstore_server::{AppState, Config, router};
use bookstore_store::Store;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

struct TestApp {
	router: Router,
	mailer: MemoryMailer,
}

fn app() -> TestApp {
	app_with(Config::default())
}

fn app_with(config: Config) -> TestApp {
	let store = Store::in_memory().unwrap();
	let mailer = MemoryMailer::new();
	let state = AppState::new(store, TokenSigner::generate(), Arc::new(mailer.clone()), config);
	TestApp {
		router: router(state),
		mailer,
	}
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
	let mut builder = Request::builder().method(method).uri(uri);
	if let Some(token) = token {
		builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
	}
	match body {
		Some(body) => builder
			.header(header::CONTENT_TYPE, "application/json")
			.body(Body::from(body.to_string()))
			.unwrap(),
		None => builder.body(Body::empty()).unwrap(),
	}
}

async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
	let response = app.router.clone().oneshot(request).await.unwrap();
	let status = response.status();
	let bytes = response.into_body().collect().await.unwrap().to_bytes();
	let body = if bytes.is_empty() {
		Value::Null
	} else {
		serde_json::from_slice(&bytes).unwrap()
	};
	(status, body)
}

async fn register(app: &TestApp, username: &str, superuser: bool) -> Value {
	let (status, body) = send(
		app,
		request(
			"POST",
			"/v1/auth/register",
			None,
			Some(json!({
				"username": username,
				"email": format!("{username}@example.com"),
				"password": "Password1!",
				"superuser": superuser,
			})),
		),
	)
	.await;
	assert_eq!(status, StatusCode::CREATED);
	body
}

async fn login(app: &TestApp, username: &str) -> String {
	let (status, body) = send(
		app,
		request(
			"POST",
			"/v1/auth/login",
			None,
			Some(json!({"username": username, "password": "Password1!"})),
		),
	)
	.await;
	assert_eq!(status, StatusCode::OK);
	body["token"].as_str().unwrap().to_string()
}

async fn signed_in(app: &TestApp, username: &str, superuser: bool) -> String {
	register(app, username, superuser).await;
	login(app, username).await
}

async fn create_book(app: &TestApp, token: &str, title: &str, price: u32, quantity: u32) -> u64 {
	let (status, body) = send(
		app,
		request(
			"POST",
			"/v1/books",
			Some(token),
			Some(json!({"title": title, "author": "Abhishek", "price": price, "quantity": quantity})),
		),
	)
	.await;
	assert_eq!(status, StatusCode::CREATED);
	body["book"]["id"].as_u64().unwrap()
}

async fn add_to_cart(app: &TestApp, token: &str, book: u64, quantity: u32) -> (StatusCode, Value) {
	send(
		app,
		request(
			"POST",
			"/v1/cart/items",
			Some(token),
			Some(json!({"book_id": book, "quantity": quantity})),
		),
	)
	.await
}

/// Pulls the token out of the last mailed link.
fn mailed_token(mailer: &MemoryMailer) -> String {
	let body = mailer.last().unwrap().body;
	let start = body.find("token=").unwrap() + "token=".len();
	let rest = &body[start..];
	let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
	rest[..end].to_string()
}

#[tokio::test]
async fn test_health() {
	let app = app();
	let (status, body) = send(&app, request("GET", "/health", None, None)).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_register_returns_view_without_secrets() {
	let app = app();
	let body = register(&app, "alice", false).await;
	assert_eq!(body["user"]["username"], "alice");
	assert_eq!(body["user"]["email"], "alice@example.com");
	assert_eq!(body["user"]["verified"], json!(false));
	assert!(body["user"].get("password").is_none());
	assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_mails_verification_link() {
	let app = app();
	register(&app, "alice", false).await;

	let mail = app.mailer.last().unwrap();
	assert_eq!(mail.to, "alice@example.com");
	assert!(mail.body.contains("/v1/auth/verify?token="));

	let token = mailed_token(&app.mailer);
	let (status, body) =
		send(&app, request("GET", &format!("/v1/auth/verify?token={token}"), None, None)).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["message"], "Account verified");
}

#[tokio::test]
async fn test_register_validates_fields() {
	let app = app();
	let cases = [
		// no uppercase
		json!({"username": "alice", "email": "alice@example.com", "password": "password1!"}),
		// too short
		json!({"username": "alice", "email": "alice@example.com", "password": "Pw1!"}),
		// not an email
		json!({"username": "alice", "email": "aliceexample.com", "password": "Password1!"}),
		// space in the username
		json!({"username": "al ice", "email": "alice@example.com", "password": "Password1!"}),
	];
	for payload in cases {
		let (status, body) =
			send(&app, request("POST", "/v1/auth/register", None, Some(payload))).await;
		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert_eq!(body["code"], "VALIDATION");
	}
}

#[tokio::test]
async fn test_register_rejects_duplicates() {
	let app = app();
	register(&app, "alice", false).await;

	let (status, body) = send(
		&app,
		request(
			"POST",
			"/v1/auth/register",
			None,
			Some(json!({"username": "alice", "email": "other@example.com", "password": "Password1!"})),
		),
	)
	.await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["code"], "DUPLICATE_USERNAME");

	let (status, body) = send(
		&app,
		request(
			"POST",
			"/v1/auth/register",
			None,
			Some(json!({"username": "bob", "email": "alice@example.com", "password": "Password1!"})),
		),
	)
	.await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["code"], "DUPLICATE_EMAIL");
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
	let app = app();
	register(&app, "alice", false).await;

	let (status, body) = send(
		&app,
		request(
			"POST",
			"/v1/auth/login",
			None,
			Some(json!({"username": "alice", "password": "Wrong1!aa"})),
		),
	)
	.await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["code"], "INVALID_CREDENTIALS");

	let (status, body) = send(
		&app,
		request(
			"POST",
			"/v1/auth/login",
			None,
			Some(json!({"username": "ghost", "password": "Password1!"})),
		),
	)
	.await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_login_works_before_verification() {
	let app = app();
	let token = signed_in(&app, "alice", false).await;
	let (status, _) = send(&app, request("GET", "/v1/books", Some(&token), None)).await;
	assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_verify_rejects_access_token() {
	let app = app();
	let token = signed_in(&app, "alice", false).await;
	let (status, body) =
		send(&app, request("GET", &format!("/v1/auth/verify?token={token}"), None, None)).await;
	assert_eq!(status, StatusCode::UNAUTHORIZED);
	assert_eq!(body["code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_password_reset_flow() {
	let app = app();
	register(&app, "alice", false).await;

	let (status, body) = send(
		&app,
		request("POST", "/v1/auth/reset", None, Some(json!({"email": "ghost@example.com"}))),
	)
	.await;
	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body["code"], "USER_NOT_FOUND");

	let (status, body) = send(
		&app,
		request("POST", "/v1/auth/reset", None, Some(json!({"email": "alice@example.com"}))),
	)
	.await;
	assert_eq!(status, StatusCode::OK);
	// the token travels only in the mail, never in the response
	assert_eq!(body, json!({"message": "Password reset mail sent"}));
	assert!(app.mailer.last().unwrap().body.contains("/v1/auth/password?token="));

	let token = mailed_token(&app.mailer);
	let uri = format!("/v1/auth/password?token={token}");

	let (status, body) =
		send(&app, request("POST", &uri, None, Some(json!({"new_password": "short"})))).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["code"], "VALIDATION");

	let (status, _) =
		send(&app, request("POST", &uri, None, Some(json!({"new_password": "Password2!"})))).await;
	assert_eq!(status, StatusCode::OK);

	let (status, body) = send(
		&app,
		request(
			"POST",
			"/v1/auth/login",
			None,
			Some(json!({"username": "alice", "password": "Password1!"})),
		),
	)
	.await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["code"], "INVALID_CREDENTIALS");

	let (status, _) = send(
		&app,
		request(
			"POST",
			"/v1/auth/login",
			None,
			Some(json!({"username": "alice", "password": "Password2!"})),
		),
	)
	.await;
	assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_books_require_auth() {
	let app = app();

	let (status, body) = send(&app, request("GET", "/v1/books", None, None)).await;
	assert_eq!(status, StatusCode::UNAUTHORIZED);
	assert_eq!(body["code"], "AUTH_REQUIRED");

	let (status, body) = send(&app, request("GET", "/v1/books", Some("garbage"), None)).await;
	assert_eq!(status, StatusCode::UNAUTHORIZED);
	assert_eq!(body["code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_expired_token_rejected() {
	let app = app_with(Config {
		access_ttl: Duration::ZERO,
		..Config::default()
	});
	let token = signed_in(&app, "alice", false).await;

	let (status, body) = send(&app, request("GET", "/v1/books", Some(&token), None)).await;
	assert_eq!(status, StatusCode::UNAUTHORIZED);
	assert_eq!(body["code"], "TOKEN_EXPIRED");
}

#[tokio::test]
async fn test_book_crud() {
	let app = app();
	let registered = register(&app, "alice", false).await;
	let alice_id = registered["user"]["id"].as_u64().unwrap();
	let token = login(&app, "alice").await;
	let id = create_book(&app, &token, "Interstellar", 20, 15).await;

	let (status, body) = send(&app, request("GET", "/v1/books", Some(&token), None)).await;
	assert_eq!(status, StatusCode::OK);
	let books = body["books"].as_array().unwrap();
	assert_eq!(books.len(), 1);
	assert_eq!(books[0]["title"], "Interstellar");
	assert_eq!(books[0]["added_by"].as_u64(), Some(alice_id));

	let (status, body) = send(
		&app,
		request(
			"PUT",
			&format!("/v1/books/{id}"),
			Some(&token),
			Some(json!({"title": "Interstellar", "author": "Abhishek", "price": 25, "quantity": 10})),
		),
	)
	.await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["book"]["price"], 25);
	assert_eq!(body["book"]["quantity"], 10);

	let (status, body) = send(
		&app,
		request(
			"PUT",
			"/v1/books/999",
			Some(&token),
			Some(json!({"title": "x", "author": "y", "price": 1, "quantity": 1})),
		),
	)
	.await;
	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body["code"], "BOOK_NOT_FOUND");
}

#[tokio::test]
async fn test_book_delete_requires_superuser() {
	let app = app();
	let alice = signed_in(&app, "alice", false).await;
	let admin = signed_in(&app, "admin", true).await;
	let id = create_book(&app, &alice, "Interstellar", 20, 15).await;

	let (status, body) =
		send(&app, request("DELETE", &format!("/v1/books/{id}"), Some(&alice), None)).await;
	assert_eq!(status, StatusCode::FORBIDDEN);
	assert_eq!(body["code"], "FORBIDDEN");

	let (status, _) =
		send(&app, request("DELETE", &format!("/v1/books/{id}"), Some(&admin), None)).await;
	assert_eq!(status, StatusCode::OK);

	let (_, body) = send(&app, request("GET", "/v1/books", Some(&alice), None)).await;
	assert_eq!(body["books"].as_array().unwrap().len(), 0);

	let (status, body) =
		send(&app, request("DELETE", &format!("/v1/books/{id}"), Some(&admin), None)).await;
	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body["code"], "BOOK_NOT_FOUND");
}

#[tokio::test]
async fn test_cart_flow() {
	let app = app();
	let token = signed_in(&app, "alice", false).await;
	let book = create_book(&app, &token, "Interstellar", 20, 15).await;

	let (status, body) = send(&app, request("GET", "/v1/cart", Some(&token), None)).await;
	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body["code"], "CART_NOT_FOUND");

	let (status, body) = add_to_cart(&app, &token, book, 2).await;
	assert_eq!(status, StatusCode::CREATED);
	assert_eq!(body["cart"]["total_quantity"], 2);
	assert_eq!(body["cart"]["total_price"], 40);
	assert_eq!(body["cart"]["items"].as_array().unwrap().len(), 1);
	let cart_id = body["cart"]["id"].as_u64().unwrap();

	// repeating the book replaces the quantity
	let (status, body) = add_to_cart(&app, &token, book, 5).await;
	assert_eq!(status, StatusCode::CREATED);
	assert_eq!(body["cart"]["total_quantity"], 5);
	assert_eq!(body["cart"]["total_price"], 100);
	assert_eq!(body["cart"]["items"].as_array().unwrap().len(), 1);

	let (status, body) = add_to_cart(&app, &token, book, 16).await;
	assert_eq!(status, StatusCode::CONFLICT);
	assert_eq!(body["code"], "OUT_OF_STOCK");

	let (status, body) = add_to_cart(&app, &token, book, 0).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["code"], "BAD_REQUEST");

	let (status, body) = send(&app, request("GET", "/v1/cart", Some(&token), None)).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["cart"]["id"].as_u64(), Some(cart_id));

	let (status, _) =
		send(&app, request("DELETE", &format!("/v1/cart/{cart_id}"), Some(&token), None)).await;
	assert_eq!(status, StatusCode::OK);

	let (status, _) = send(&app, request("GET", "/v1/cart", Some(&token), None)).await;
	assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cart_rejects_unknown_book() {
	let app = app();
	let token = signed_in(&app, "alice", false).await;

	let (status, body) = add_to_cart(&app, &token, 999, 1).await;
	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body["code"], "BOOK_NOT_FOUND");
}

#[tokio::test]
async fn test_order_flow() {
	let app = app();
	let token = signed_in(&app, "alice", false).await;
	let book = create_book(&app, &token, "Interstellar", 20, 15).await;

	let (_, body) = add_to_cart(&app, &token, book, 4).await;
	let cart_id = body["cart"]["id"].as_u64().unwrap();

	let (status, body) = send(
		&app,
		request("POST", "/v1/orders", Some(&token), Some(json!({"cart_id": cart_id}))),
	)
	.await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["cart"]["ordered"], json!(true));
	assert!(body["cart"]["ordered_at"].is_u64());

	let (_, body) = send(&app, request("GET", "/v1/books", Some(&token), None)).await;
	assert_eq!(body["books"][0]["quantity"], 11);

	let (status, _) = send(&app, request("GET", "/v1/cart", Some(&token), None)).await;
	assert_eq!(status, StatusCode::NOT_FOUND);

	let (status, body) = send(&app, request("GET", "/v1/orders", Some(&token), None)).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["orders"].as_array().unwrap().len(), 1);

	// the cart is no longer open
	let (status, body) = send(
		&app,
		request("POST", "/v1/orders", Some(&token), Some(json!({"cart_id": cart_id}))),
	)
	.await;
	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body["code"], "CART_NOT_FOUND");

	let (status, _) =
		send(&app, request("DELETE", &format!("/v1/orders/{cart_id}"), Some(&token), None)).await;
	assert_eq!(status, StatusCode::OK);

	let (_, body) = send(&app, request("GET", "/v1/books", Some(&token), None)).await;
	assert_eq!(body["books"][0]["quantity"], 15);

	let (_, body) = send(&app, request("GET", "/v1/orders", Some(&token), None)).await;
	assert_eq!(body["orders"].as_array().unwrap().len(), 0);

	let (status, body) =
		send(&app, request("DELETE", &format!("/v1/orders/{cart_id}"), Some(&token), None)).await;
	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body["code"], "ORDER_NOT_FOUND");
}

#[tokio::test]
async fn test_order_stock_rechecked_at_placement() {
	let app = app();
	let alice = signed_in(&app, "alice", false).await;
	let bob = signed_in(&app, "bob", false).await;
	let book = create_book(&app, &alice, "Interstellar", 20, 10).await;

	let (_, body) = add_to_cart(&app, &alice, book, 7).await;
	let alice_cart = body["cart"]["id"].as_u64().unwrap();
	let (status, body) = add_to_cart(&app, &bob, book, 7).await;
	assert_eq!(status, StatusCode::CREATED);
	let bob_cart = body["cart"]["id"].as_u64().unwrap();

	let (status, _) = send(
		&app,
		request("POST", "/v1/orders", Some(&alice), Some(json!({"cart_id": alice_cart}))),
	)
	.await;
	assert_eq!(status, StatusCode::OK);

	let (status, body) = send(
		&app,
		request("POST", "/v1/orders", Some(&bob), Some(json!({"cart_id": bob_cart}))),
	)
	.await;
	assert_eq!(status, StatusCode::CONFLICT);
	assert_eq!(body["code"], "OUT_OF_STOCK");

	// the failed placement deducted nothing
	let (_, body) = send(&app, request("GET", "/v1/books", Some(&bob), None)).await;
	assert_eq!(body["books"][0]["quantity"], 3);
}

#[tokio::test]
async fn test_carts_and_orders_are_per_user() {
	let app = app();
	let alice = signed_in(&app, "alice", false).await;
	let bob = signed_in(&app, "bob", false).await;
	let book = create_book(&app, &alice, "Interstellar", 20, 15).await;

	let (_, body) = add_to_cart(&app, &alice, book, 2).await;
	let cart_id = body["cart"]["id"].as_u64().unwrap();

	let (status, _) =
		send(&app, request("DELETE", &format!("/v1/cart/{cart_id}"), Some(&bob), None)).await;
	assert_eq!(status, StatusCode::NOT_FOUND);

	let (status, _) = send(
		&app,
		request("POST", "/v1/orders", Some(&alice), Some(json!({"cart_id": cart_id}))),
	)
	.await;
	assert_eq!(status, StatusCode::OK);

	let (status, _) =
		send(&app, request("DELETE", &format!("/v1/orders/{cart_id}"), Some(&bob), None)).await;
	assert_eq!(status, StatusCode::NOT_FOUND);

	let (_, body) = send(&app, request("GET", "/v1/orders", Some(&bob), None)).await;
	assert_eq!(body["orders"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
	let app = app();
	let req = Request::builder()
		.method("POST")
		.uri("/v1/auth/register")
		.header(header::CONTENT_TYPE, "application/json")
		.body(Body::from("{not json"))
		.unwrap();
	let (status, body) = send(&app, req).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["code"], "BAD_REQUEST");
}
