// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Outgoing mail.
//!
//! Handlers talk to a [`Mailer`] and never to SMTP directly. In production
//! that is a [`MailQueue`] wrapping an [`SmtpMailer`], so delivery happens
//! off the request path; in development it is a [`LogMailer`] and in tests
//! a [`MemoryMailer`] that records what would have gone out.

pub mod error;
pub mod memory;
pub mod queue;
pub mod smtp;

pub use error::MailError;
pub use memory::MemoryMailer;
pub use queue::MailQueue;
pub use smtp::SmtpMailer;

use tracing::{debug, info};

/// A plain-text mail, addressed but not yet routed through a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
	pub to: String,
	pub subject: String,
	pub body: String,
}

pub trait Mailer: Send + Sync {
	fn send(&self, message: Message) -> Result<(), MailError>;
}

/// Writes mail to the log instead of a wire. The default when no SMTP
/// relay is configured.
pub struct LogMailer;

impl Mailer for LogMailer {
	fn send(&self, message: Message) -> Result<(), MailError> {
		info!(to = %message.to, subject = %message.subject, "outgoing mail");
		debug!("{}", message.body);
		Ok(())
	}
}
