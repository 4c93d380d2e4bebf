//! Post record.
//!
//! # Invariants
//! - `id` is generated once (UUID v4) and never reused for another post.
//! - `user_email` referenced an existing user when the post was created; it
//!   is not re-checked afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable post identifier as stored in the document.
///
/// Kept as a string so externally written documents may use any id format.
pub type PostId = String;

/// A text post authored by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    /// UTC creation time, encoded as RFC3339.
    pub created_at: DateTime<Utc>,
    /// Author email; foreign key into the document's `users` map.
    pub user_email: String,
    pub text: String,
}

impl Post {
    /// Creates a post with a fresh random id, stamped with the current UTC time.
    pub fn new(user_email: impl Into<String>, text: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), user_email, text)
    }

    /// Creates a post with a caller-provided id.
    ///
    /// Used by tests and import paths where identity already exists.
    pub fn with_id(
        id: impl Into<PostId>,
        user_email: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            created_at: Utc::now(),
            user_email: user_email.into(),
            text: text.into(),
        }
    }

    /// Returns whether this post was authored by `email`.
    pub fn is_authored_by(&self, email: &str) -> bool {
        self.user_email == email
    }
}
