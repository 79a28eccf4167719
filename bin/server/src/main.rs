// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use std::sync::Arc;

use bookstore_auth::TokenSigner;
use bookstore_mail::{LogMailer, MailQueue, Mailer, SmtpMailer};
use bookstore_server::{AppState, Config, router};
use bookstore_store::Store;
use tokio::{
	net::TcpListener,
	signal::{
		ctrl_c,
		unix::{SignalKind, signal},
	},
};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() {
	fmt().with_env_filter(EnvFilter::from_default_env()).init();

	if let Err(e) = run(Config::from_env()).await {
		error!("Startup failed: {e}");
		std::process::exit(1);
	}
}

async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
	let store = Store::open(&config.db_path)?;
	info!("Database open at {}", config.db_path);

	let tokens = match &config.token_key {
		Some(encoded) => TokenSigner::from_bs58_seed(encoded)?,
		None => {
			warn!("BOOKSTORE_TOKEN_KEY not set, generating a key; tokens die with this process");
			TokenSigner::generate()
		}
	};

	let mailer: Arc<dyn Mailer> = match &config.smtp_addr {
		Some(addr) => {
			info!("Delivering mail through {addr}");
			Arc::new(MailQueue::new(Arc::new(SmtpMailer::new(addr, &config.smtp_from)?)))
		}
		None => {
			warn!("BOOKSTORE_SMTP_ADDR not set, mail goes to the log");
			Arc::new(LogMailer)
		}
	};

	let app = router(AppState::new(store, tokens, mailer, config.clone()));

	let listener = TcpListener::bind(&config.http_addr).await?;
	info!("Server running on {}", config.http_addr);

	axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

	info!("Server shut down");
	Ok(())
}

async fn shutdown_signal() {
	let ctrl_c = async {
		ctrl_c().await.expect("Failed to install Ctrl+C handler");

		info!("Received Ctrl+C, shutting down");
	};

	let terminate = async {
		signal(SignalKind::terminate())
			.expect("Failed to install signal handler")
			.recv()
			.await;

		info!("Received terminate signal, shutting down");
	};

	tokio::select! {
		_ = ctrl_c => {},
		_ = terminate => {},
	}
}
