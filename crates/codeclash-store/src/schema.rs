//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage. Each
//! document collection maps to one column family; `users_by_email` is a
//! secondary index maintained alongside user inserts.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// User documents, keyed by `user_id`.
    pub const USERS: &str = "users";

    /// Index: user id by lowercased email. Value is the 16-byte user id.
    pub const USERS_BY_EMAIL: &str = "users_by_email";

    /// Contest documents, keyed by `contest_id`.
    pub const CONTESTS: &str = "contests";

    /// Discussion post documents, keyed by `post_id`.
    pub const POSTS: &str = "posts";

    /// Comment documents, keyed by `comment_id`.
    pub const COMMENTS: &str = "comments";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![
        cf::USERS,
        cf::USERS_BY_EMAIL,
        cf::CONTESTS,
        cf::POSTS,
        cf::COMMENTS,
    ]
}
