// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Authentication primitives: argon2 password hashing and compact signed
//! bearer tokens.
//!
//! Tokens are ed25519 signatures over a small JSON claims blob, encoded as
//! `bs58(claims).bs58(signature)`. Every token is bound to a purpose
//! (login, email verification, password reset) and is rejected anywhere
//! else, so a captured login token cannot be replayed against the password
//! reset endpoint.

pub mod error;
pub mod password;
pub mod token;

pub use error::AuthError;
pub use token::{TokenClaims, TokenPurpose, TokenSigner};
