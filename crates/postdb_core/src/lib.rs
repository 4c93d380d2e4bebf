//! Embedded JSON document store for users and their posts.
//! Every operation is a whole-file load, one mutation, and a whole-file replace.

pub mod db;
pub mod logging;
pub mod model;
pub mod store;

pub use db::{DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::document::Document;
pub use model::post::{Post, PostId};
pub use model::user::{User, UserEmail};
pub use store::{Store, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
