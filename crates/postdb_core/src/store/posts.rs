//! Post operations.

use super::{Store, StoreError, StoreResult};
use crate::model::post::Post;

impl Store {
    /// Creates a post for an existing user.
    ///
    /// # Errors
    /// - `StoreError::UserNotFound` when the author does not exist; no post
    ///   is written.
    pub fn create_post(&self, user_email: &str, text: &str) -> StoreResult<Post> {
        self.mutate("post_create", |document| {
            if !document.has_user(user_email) {
                return Err(StoreError::UserNotFound(user_email.to_owned()));
            }
            let post = Post::new(user_email, text);
            document.put_post(post.clone());
            Ok(post)
        })
    }

    /// Returns every post authored by `user_email`, in unspecified order.
    ///
    /// An unknown author yields an empty list, not an error.
    pub fn get_posts(&self, user_email: &str) -> StoreResult<Vec<Post>> {
        self.read("post_list", |document| {
            Ok(document.posts_by(user_email).cloned().collect())
        })
    }

    /// Removes a post if present. Absent posts are not an error.
    pub fn delete_post(&self, id: &str) -> StoreResult<()> {
        self.mutate("post_delete", |document| {
            document.posts.remove(id);
            Ok(())
        })
    }
}
