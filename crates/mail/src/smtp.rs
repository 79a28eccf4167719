// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use lettre::{SmtpTransport, Transport, message::Mailbox};
use tracing::instrument;

use crate::{MailError, Mailer, Message};

const DEFAULT_SMTP_PORT: u16 = 25;

/// Delivers mail over a plaintext SMTP connection. Meant for a local relay
/// or a dev catcher such as mailpit; there is no TLS or authentication.
pub struct SmtpMailer {
	transport: SmtpTransport,
	from: Mailbox,
}

impl SmtpMailer {
	/// `addr` is `host` or `host:port`, `from` a mailbox like
	/// `Bookstore <noreply@example.com>`.
	pub fn new(addr: &str, from: &str) -> Result<Self, MailError> {
		let (host, port) = match addr.split_once(':') {
			Some((host, port)) => {
				let port = port.parse::<u16>().map_err(|_| MailError::Address(addr.to_string()))?;
				(host, port)
			}
			None => (addr, DEFAULT_SMTP_PORT),
		};
		let from = from.parse::<Mailbox>().map_err(|e| MailError::Address(e.to_string()))?;
		let transport = SmtpTransport::builder_dangerous(host).port(port).build();
		Ok(Self {
			transport,
			from,
		})
	}
}

impl Mailer for SmtpMailer {
	#[instrument(name = "mail::smtp::send", level = "debug", skip(self, message), fields(to = %message.to))]
	fn send(&self, message: Message) -> Result<(), MailError> {
		let to = message.to.parse::<Mailbox>().map_err(|e| MailError::Address(e.to_string()))?;
		let email = lettre::Message::builder()
			.from(self.from.clone())
			.to(to)
			.subject(message.subject)
			.body(message.body)
			.map_err(|e| MailError::Transport(e.to_string()))?;
		self.transport.send(&email).map_err(|e| MailError::Transport(e.to_string()))?;
		Ok(())
	}
}
