// Copyright (C) 2026 The Idea Hub Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for Idea Hub.
//!
//! Workflow state is mirrored into a synchronous string-keyed store, one
//! serialized collection per key:
//!
//! - `ideas` and `appeals` hold the workflow collections (see
//!   [`repository`]).
//! - `users` and `current_user` hold the member directory and the active
//!   session (see [`directory`]).
//!
//! The store itself is deliberately minimal: get/set/remove, no
//! transactions, every write a full replace. [`store::SqliteStore`] is the
//! durable backend; [`store::MemoryStore`] backs tests.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

pub mod directory;
mod error;
pub mod repository;
mod store;

pub use error::PersistenceError;
pub use store::{KeyValueStore, MemoryStore, SqliteStore};
