// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use std::time::{SystemTime, UNIX_EPOCH};

/// Current unix time in seconds. Timestamps and token lifetimes all use
/// second resolution.
pub fn now_secs() -> u64 {
	SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0)
}
