// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

/// Authentication failures.
///
/// `MissingCredentials` and `InvalidHeader` are produced by the HTTP layer
/// when it looks for the bearer token; the rest come from token
/// verification and password checks here.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuthError {
	#[error("missing credentials")]
	MissingCredentials,
	#[error("malformed authorization header")]
	InvalidHeader,
	#[error("invalid token")]
	InvalidToken,
	#[error("token expired")]
	Expired,
	#[error("token not valid for this operation")]
	WrongPurpose,
	#[error("invalid username or password")]
	InvalidCredentials,
	#[error("invalid signing key")]
	InvalidKey,
	#[error("claims encoding failed: {0}")]
	Encoding(String),
	#[error("password hashing failed: {0}")]
	Hash(String),
}
