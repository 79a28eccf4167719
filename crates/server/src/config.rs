// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use std::{env, fmt::Display, str::FromStr, time::Duration};

use tracing::{info, warn};

/// Runtime configuration, loaded from `BOOKSTORE_*` environment variables
/// with logged defaults. Nothing here is required; an empty environment
/// yields a local dev setup with log-only mail.
#[derive(Debug, Clone)]
pub struct Config {
	/// Address the HTTP server binds to.
	pub http_addr: String,
	/// Path of the sqlite database file.
	pub db_path: String,
	/// Public base URL used in mailed links.
	pub base_url: String,
	/// bs58-encoded 32-byte token signing seed. A fresh key is generated
	/// when unset, which invalidates outstanding tokens on restart.
	pub token_key: Option<String>,
	/// Lifetime of access tokens handed out at login.
	pub access_ttl: Duration,
	/// Lifetime of account verification links.
	pub verify_ttl: Duration,
	/// Lifetime of password reset links.
	pub reset_ttl: Duration,
	/// SMTP relay as `host` or `host:port`. Mail goes to the log when unset.
	pub smtp_addr: Option<String>,
	/// Sender mailbox for outgoing mail.
	pub smtp_from: String,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			http_addr: "127.0.0.1:8080".to_string(),
			db_path: "bookstore.db".to_string(),
			base_url: "http://127.0.0.1:8080".to_string(),
			token_key: None,
			access_ttl: Duration::from_secs(60 * 60),
			verify_ttl: Duration::from_secs(24 * 60 * 60),
			reset_ttl: Duration::from_secs(15 * 60),
			smtp_addr: None,
			smtp_from: "Bookstore <noreply@bookstore.local>".to_string(),
		}
	}
}

impl Config {
	pub fn from_env() -> Self {
		let defaults = Self::default();
		Self {
			http_addr: load("BOOKSTORE_HTTP_ADDR", defaults.http_addr),
			db_path: load("BOOKSTORE_DB_PATH", defaults.db_path),
			base_url: load("BOOKSTORE_BASE_URL", defaults.base_url),
			token_key: var("BOOKSTORE_TOKEN_KEY"),
			access_ttl: Duration::from_secs(try_load(
				"BOOKSTORE_ACCESS_TTL_SECS",
				defaults.access_ttl.as_secs(),
			)),
			verify_ttl: Duration::from_secs(try_load(
				"BOOKSTORE_VERIFY_TTL_SECS",
				defaults.verify_ttl.as_secs(),
			)),
			reset_ttl: Duration::from_secs(try_load(
				"BOOKSTORE_RESET_TTL_SECS",
				defaults.reset_ttl.as_secs(),
			)),
			smtp_addr: var("BOOKSTORE_SMTP_ADDR"),
			smtp_from: load("BOOKSTORE_SMTP_FROM", defaults.smtp_from),
		}
	}
}

fn var(key: &str) -> Option<String> {
	env::var(key).ok().filter(|value| !value.is_empty())
}

fn load(key: &str, default: String) -> String {
	match var(key) {
		Some(value) => value,
		None => {
			info!("{key} not set, using default: {default}");
			default
		}
	}
}

fn try_load<T>(key: &str, default: T) -> T
where
	T: FromStr + Display,
{
	match var(key) {
		Some(raw) => match raw.parse() {
			Ok(value) => value,
			Err(_) => {
				warn!("Invalid {key} value {raw:?}, using default: {default}");
				default
			}
		},
		None => {
			info!("{key} not set, using default: {default}");
			default
		}
	}
}
