// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use argon2::{
	Argon2,
	password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::AuthError;

/// Hash a password with argon2id and a fresh random salt. The result is a
/// PHC string suitable for storage.
pub fn hash(password: &str) -> Result<String, AuthError> {
	let salt = SaltString::generate(&mut OsRng);
	let hash = Argon2::default()
		.hash_password(password.as_bytes(), &salt)
		.map_err(|e| AuthError::Hash(e.to_string()))?;
	Ok(hash.to_string())
}

/// Verify a password against a stored PHC string.
///
/// A mismatch is `InvalidCredentials`; a hash that cannot even be parsed is
/// an internal `Hash` error since it means the stored value is corrupt.
pub fn verify(password: &str, stored: &str) -> Result<(), AuthError> {
	let parsed = PasswordHash::new(stored).map_err(|e| AuthError::Hash(e.to_string()))?;
	Argon2::default()
		.verify_password(password.as_bytes(), &parsed)
		.map_err(|_| AuthError::InvalidCredentials)
}
