//! User and note storage for Quick Notes
//!
//! This crate provides the persistence abstraction behind the server: a
//! [`NoteStore`] trait plus an in-memory implementation (tests and
//! single-process runs) and a SQLite implementation backed by sqlx.
//!
//! The store is the only shared mutable resource in the system and the sole
//! enforcer of per-record atomicity: unique emails and monotonic note ids
//! are guaranteed here, not re-checked by callers.

mod error;
mod memory;
mod sqlite;
mod traits;

pub use error::*;
pub use memory::*;
pub use sqlite::*;
pub use traits::*;
