// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

use std::{sync::Arc, time::Duration};

use bookstore_core::{UserId, now_secs};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::{RngCore, rngs::OsRng};
use serde::{Deserialize, Serialize};

use crate::AuthError;

/// Length of the ed25519 seed in bytes.
pub const TOKEN_SEED_LEN: usize = 32;

/// What a token is allowed to do. Verification is purpose-bound: a token
/// minted for one flow is invalid in every other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
	/// Regular API access, minted at login.
	Access,
	/// Email address verification, sent by mail after registration.
	Verify,
	/// Password reset, sent by mail on request.
	Reset,
}

/// Signed token payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
	pub user: UserId,
	pub purpose: TokenPurpose,
	pub issued_at: u64,
	pub expires_at: u64,
}

/// Issues and verifies bearer tokens.
///
/// Cheap to clone; the signing key is shared behind an `Arc`.
#[derive(Clone)]
pub struct TokenSigner {
	inner: Arc<TokenSignerInner>,
}

struct TokenSignerInner {
	signing: SigningKey,
	verifying: VerifyingKey,
}

impl TokenSigner {
	pub fn from_seed(seed: &[u8; TOKEN_SEED_LEN]) -> Self {
		let signing = SigningKey::from_bytes(seed);
		let verifying = signing.verifying_key();
		Self {
			inner: Arc::new(TokenSignerInner {
				signing,
				verifying,
			}),
		}
	}

	/// Build a signer from a bs58 encoded 32 byte seed, the format used in
	/// configuration.
	pub fn from_bs58_seed(encoded: &str) -> Result<Self, AuthError> {
		let bytes = bs58::decode(encoded).into_vec().map_err(|_| AuthError::InvalidKey)?;
		let seed: [u8; TOKEN_SEED_LEN] = bytes.try_into().map_err(|_| AuthError::InvalidKey)?;
		Ok(Self::from_seed(&seed))
	}

	/// Generate a signer with a random seed. Tokens die with the process;
	/// only suitable for development and tests.
	pub fn generate() -> Self {
		let mut seed = [0u8; TOKEN_SEED_LEN];
		OsRng.fill_bytes(&mut seed);
		Self::from_seed(&seed)
	}

	pub fn issue(&self, user: UserId, purpose: TokenPurpose, ttl: Duration) -> Result<String, AuthError> {
		self.issue_at(user, purpose, now_secs(), ttl)
	}

	fn issue_at(&self, user: UserId, purpose: TokenPurpose, now: u64, ttl: Duration) -> Result<String, AuthError> {
		let claims = TokenClaims {
			user,
			purpose,
			issued_at: now,
			expires_at: now.saturating_add(ttl.as_secs()),
		};
		let payload = serde_json::to_vec(&claims).map_err(|e| AuthError::Encoding(e.to_string()))?;
		let signature = self.inner.signing.sign(&payload);
		Ok(format!(
			"{}.{}",
			bs58::encode(&payload).into_string(),
			bs58::encode(signature.to_bytes()).into_string()
		))
	}

	pub fn verify(&self, token: &str, expected: TokenPurpose) -> Result<TokenClaims, AuthError> {
		self.verify_at(token, expected, now_secs())
	}

	fn verify_at(&self, token: &str, expected: TokenPurpose, now: u64) -> Result<TokenClaims, AuthError> {
		let (payload_part, signature_part) = token.split_once('.').ok_or(AuthError::InvalidToken)?;

		let payload = bs58::decode(payload_part).into_vec().map_err(|_| AuthError::InvalidToken)?;
		let signature_bytes =
			bs58::decode(signature_part).into_vec().map_err(|_| AuthError::InvalidToken)?;
		let signature = Signature::from_slice(&signature_bytes).map_err(|_| AuthError::InvalidToken)?;

		self.inner.verifying.verify(&payload, &signature).map_err(|_| AuthError::InvalidToken)?;

		let claims: TokenClaims = serde_json::from_slice(&payload).map_err(|_| AuthError::InvalidToken)?;
		if claims.expires_at <= now {
			return Err(AuthError::Expired);
		}
		if claims.purpose != expected {
			return Err(AuthError::WrongPurpose);
		}
		Ok(claims)
	}
}
