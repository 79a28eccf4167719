// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{MailError, Mailer, Message};

/// Records every message instead of delivering it. Tests keep a clone and
/// inspect what the handlers tried to send.
#[derive(Clone, Default)]
pub struct MemoryMailer {
	sent: Arc<Mutex<Vec<Message>>>,
}

impl MemoryMailer {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn sent(&self) -> Vec<Message> {
		self.sent.lock().clone()
	}

	pub fn last(&self) -> Option<Message> {
		self.sent.lock().last().cloned()
	}
}

impl Mailer for MemoryMailer {
	fn send(&self, message: Message) -> Result<(), MailError> {
		self.sent.lock().push(message);
		Ok(())
	}
}
