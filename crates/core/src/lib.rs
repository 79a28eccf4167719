// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later, see license.md file

//! Domain model for the bookstore.
//!
//! This crate holds the typed ids, the user/book/cart structs shared by the
//! storage and HTTP layers, and the input validation rules for registration.
//! It has no I/O; persistence lives in `bookstore-store` and the HTTP surface
//! in `bookstore-server`.

pub mod book;
pub mod cart;
pub mod clock;
pub mod id;
pub mod user;
pub mod validate;

pub use book::{Book, BookUpdate, NewBook};
pub use cart::{Cart, CartItem, CartWithItems};
pub use clock::now_secs;
pub use id::{BookId, CartId, CartItemId, UserId};
pub use user::{NewUser, User, UserView};
pub use validate::ValidationError;
