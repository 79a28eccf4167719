// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use std::{
	sync::Arc,
	thread::{self, JoinHandle},
};

use crossbeam_channel::{Receiver, Sender, unbounded};
use parking_lot::Mutex;
use tracing::error;

use crate::{MailError, Mailer, Message};

enum Command {
	Send(Message),
	Shutdown,
}

/// Hands messages to a worker thread so delivery never blocks the caller.
/// Messages queued before the last handle drops are still delivered; the
/// drop joins the worker after it drains the channel.
#[derive(Clone)]
pub struct MailQueue {
	inner: Arc<MailQueueInner>,
}

struct MailQueueInner {
	sender: Sender<Command>,
	worker: Mutex<Option<JoinHandle<()>>>,
}

impl MailQueue {
	pub fn new(mailer: Arc<dyn Mailer>) -> Self {
		let (sender, receiver) = unbounded();
		let worker = thread::spawn(move || run_worker(receiver, mailer));
		Self {
			inner: Arc::new(MailQueueInner {
				sender,
				worker: Mutex::new(Some(worker)),
			}),
		}
	}
}

fn run_worker(receiver: Receiver<Command>, mailer: Arc<dyn Mailer>) {
	while let Ok(command) = receiver.recv() {
		match command {
			Command::Send(message) => {
				if let Err(e) = mailer.send(message) {
					error!(error = %e, "mail delivery failed");
				}
			}
			Command::Shutdown => break,
		}
	}
}

impl Mailer for MailQueue {
	fn send(&self, message: Message) -> Result<(), MailError> {
		self.inner.sender.send(Command::Send(message)).map_err(|_| MailError::QueueClosed)
	}
}

impl Drop for MailQueueInner {
	fn drop(&mut self) {
		let _ = self.sender.send(Command::Shutdown);
		if let Some(worker) = self.worker.lock().take() {
			let _ = worker.join();
		}
	}
}
