// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use std::sync::Arc;

use bookstore_auth::TokenSigner;
use bookstore_mail::Mailer;
use bookstore_store::{Store, StoreError};

use crate::{config::Config, error::AppError};

/// Shared application state handed to every handler. Cloning is cheap;
/// everything lives behind one `Arc`.
#[derive(Clone)]
pub struct AppState {
	inner: Arc<AppStateInner>,
}

struct AppStateInner {
	store: Store,
	tokens: TokenSigner,
	mailer: Arc<dyn Mailer>,
	config: Config,
}

impl AppState {
	pub fn new(store: Store, tokens: TokenSigner, mailer: Arc<dyn Mailer>, config: Config) -> Self {
		Self {
			inner: Arc::new(AppStateInner {
				store,
				tokens,
				mailer,
				config,
			}),
		}
	}

	pub fn tokens(&self) -> &TokenSigner {
		&self.inner.tokens
	}

	pub fn mailer(&self) -> &dyn Mailer {
		self.inner.mailer.as_ref()
	}

	pub fn config(&self) -> &Config {
		&self.inner.config
	}

	/// Runs a store operation on the blocking pool. sqlite calls hold a
	/// connection mutex, so they must not run on the async workers.
	pub async fn with_store<T, F>(&self, f: F) -> Result<T, AppError>
	where
		F: FnOnce(Store) -> Result<T, StoreError> + Send + 'static,
		T: Send + 'static,
	{
		let store = self.inner.store.clone();
		let result = tokio::task::spawn_blocking(move || f(store))
			.await
			.map_err(|e| AppError::Internal(format!("store task panicked: {e}")))?;
		result.map_err(AppError::from)
	}
}
