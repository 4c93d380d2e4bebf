//! User operations.

use super::{Store, StoreError, StoreResult};
use crate::model::user::User;

impl Store {
    /// Creates a user, silently replacing any existing user with this email.
    ///
    /// The returned record carries a fresh `created_at`.
    pub fn create_user(
        &self,
        email: &str,
        password: &str,
        name: &str,
        age: i64,
    ) -> StoreResult<User> {
        self.mutate("user_create", |document| {
            let user = User::new(email, password, name, age);
            document.put_user(user.clone());
            Ok(user)
        })
    }

    /// Replaces password, name and age of an existing user.
    ///
    /// `email` and `created_at` are preserved.
    ///
    /// # Errors
    /// - `StoreError::UserNotFound` when no user has this email; the file is
    ///   left unchanged.
    pub fn update_user(
        &self,
        email: &str,
        password: &str,
        name: &str,
        age: i64,
    ) -> StoreResult<User> {
        self.mutate("user_update", |document| {
            let user = document
                .users
                .get_mut(email)
                .ok_or_else(|| StoreError::UserNotFound(email.to_owned()))?;
            user.apply_update(password, name, age);
            Ok(user.clone())
        })
    }

    /// Fetches a user by email.
    pub fn get_user(&self, email: &str) -> StoreResult<User> {
        self.read("user_get", |document| {
            document
                .users
                .get(email)
                .cloned()
                .ok_or_else(|| StoreError::UserNotFound(email.to_owned()))
        })
    }

    /// Removes a user if present. Absent users are not an error.
    ///
    /// The document is rewritten even when nothing was removed, and the
    /// user's posts are kept.
    pub fn delete_user(&self, email: &str) -> StoreResult<()> {
        self.mutate("user_delete", |document| {
            document.users.remove(email);
            Ok(())
        })
    }
}
