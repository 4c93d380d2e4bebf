//! User record.
//!
//! # Invariants
//! - `email` is both the document map key and an embedded field; it never
//!   changes after creation.
//! - `created_at` is stamped once by `User::new` and never touched by updates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Users are keyed by their email address.
pub type UserEmail = String;

/// A registered user.
///
/// `password` is stored verbatim, without hashing. This is an inherited
/// security deficiency of the document format; do not rely on this store for
/// real credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// UTC creation time, encoded as RFC3339.
    pub created_at: DateTime<Utc>,
    pub email: UserEmail,
    pub password: String,
    pub name: String,
    pub age: i64,
}

impl User {
    /// Creates a user stamped with the current UTC time.
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
        age: i64,
    ) -> Self {
        Self {
            created_at: Utc::now(),
            email: email.into(),
            password: password.into(),
            name: name.into(),
            age,
        }
    }

    /// Replaces the mutable profile fields, keeping `email` and `created_at`.
    pub fn apply_update(
        &mut self,
        password: impl Into<String>,
        name: impl Into<String>,
        age: i64,
    ) {
        self.password = password.into();
        self.name = name.into();
        self.age = age;
    }
}
