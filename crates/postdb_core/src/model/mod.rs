//! Persisted domain model for users, posts and the root document.
//!
//! # Responsibility
//! - Define the exact on-disk JSON shape of the store.
//! - Provide constructors that stamp identity and creation time once.
//!
//! # Invariants
//! - Wire field names are fixed and case-sensitive (`createdAt`, `userEmail`).
//! - A record's map key always equals its embedded identity field.

pub mod document;
pub mod post;
pub mod user;
