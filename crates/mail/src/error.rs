// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MailError {
	/// A sender or recipient address did not parse.
	#[error("invalid mail address: {0}")]
	Address(String),
	/// Building or handing the message to the transport failed.
	#[error("mail transport failed: {0}")]
	Transport(String),
	/// The background queue has already shut down.
	#[error("mail queue is closed")]
	QueueClosed,
}
