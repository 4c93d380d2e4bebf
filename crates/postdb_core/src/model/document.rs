//! Root document persisted as a single JSON object.
//!
//! # Responsibility
//! - Own every user and post record.
//! - Keep map keys and embedded identity fields in sync on every write path.
//!
//! # Invariants
//! - `users[k].email == k` and `posts[k].id == k` for every entry.
//! - Both collections are always present on disk, possibly empty.

use super::post::{Post, PostId};
use super::user::{User, UserEmail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// All persisted state.
///
/// Ordered maps keep the encoded file stable across rewrites of identical
/// content. Callers must not depend on iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub users: BTreeMap<UserEmail, User>,
    pub posts: BTreeMap<PostId, Post>,
}

impl Document {
    /// Creates a document with empty user and post collections.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Inserts or replaces a user under its own email.
    pub fn put_user(&mut self, user: User) {
        self.users.insert(user.email.clone(), user);
    }

    /// Inserts or replaces a post under its own id.
    pub fn put_post(&mut self, post: Post) {
        self.posts.insert(post.id.clone(), post);
    }

    /// Returns whether a user with this email exists.
    pub fn has_user(&self, email: &str) -> bool {
        self.users.contains_key(email)
    }

    /// Linear scan over all posts authored by `email`.
    pub fn posts_by<'a>(&'a self, email: &'a str) -> impl Iterator<Item = &'a Post> + 'a {
        self.posts
            .values()
            .filter(move |post| post.is_authored_by(email))
    }

    /// Checks that every map key matches its record's identity field.
    ///
    /// Returns a description of the first mismatch found.
    pub fn validate(&self) -> Result<(), String> {
        if let Some((key, user)) = self.users.iter().find(|(key, user)| **key != user.email) {
            return Err(format!(
                "user key `{key}` does not match embedded email `{}`",
                user.email
            ));
        }
        if let Some((key, post)) = self.posts.iter().find(|(key, post)| **key != post.id) {
            return Err(format!(
                "post key `{key}` does not match embedded id `{}`",
                post.id
            ));
        }
        Ok(())
    }
}
