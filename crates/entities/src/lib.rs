//! Core entity definitions for Quick Notes
//!
//! This crate contains the data model shared by the store, the
//! authentication layer, and the HTTP server: users, notes, and the
//! tagged outcome of a note update.

mod note;
mod user;

pub use note::*;
pub use user::*;
