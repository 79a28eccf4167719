// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Input validation for registration and password changes.
//!
//! The rules are deliberately strict: usernames are word characters only,
//! emails must look like `local@domain.tld`, and passwords need a minimum
//! of structure. Everything else about a request is checked by the store
//! (uniqueness) or the handlers (authorization).

use once_cell::sync::Lazy;
use regex::Regex;

const MAX_USERNAME_LEN: usize = 50;
const MAX_EMAIL_LEN: usize = 50;
const MIN_PASSWORD_LEN: usize = 8;

/// Special characters permitted in passwords besides letters and digits.
const PASSWORD_SPECIALS: &str = "!@#$%^&*()";

static USERNAME_PATTERN: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("invalid username pattern"));

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("invalid email pattern")
});

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
	#[error("username must be 1-50 characters of letters, digits or underscores")]
	InvalidUsername,
	#[error("invalid email address")]
	InvalidEmail,
	#[error("password must be at least 8 characters")]
	PasswordTooShort,
	#[error("password needs at least one uppercase letter and one digit")]
	PasswordTooWeak,
	#[error("password contains characters outside the allowed set")]
	PasswordInvalidChars,
}

pub fn username(username: &str) -> Result<(), ValidationError> {
	if username.is_empty() || username.len() > MAX_USERNAME_LEN {
		return Err(ValidationError::InvalidUsername);
	}
	if !USERNAME_PATTERN.is_match(username) {
		return Err(ValidationError::InvalidUsername);
	}
	Ok(())
}

pub fn email(email: &str) -> Result<(), ValidationError> {
	if email.is_empty() || email.len() > MAX_EMAIL_LEN {
		return Err(ValidationError::InvalidEmail);
	}
	if !EMAIL_PATTERN.is_match(email) {
		return Err(ValidationError::InvalidEmail);
	}
	Ok(())
}

pub fn password(password: &str) -> Result<(), ValidationError> {
	if password.len() < MIN_PASSWORD_LEN {
		return Err(ValidationError::PasswordTooShort);
	}
	if !password.chars().all(|c| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(c)) {
		return Err(ValidationError::PasswordInvalidChars);
	}
	let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
	let has_digit = password.chars().any(|c| c.is_ascii_digit());
	if !has_upper || !has_digit {
		return Err(ValidationError::PasswordTooWeak);
	}
	Ok(())
}
