//! Document storage layer for codeclash.
//!
//! This crate provides persistent storage for the four document collections
//! (users, contests, discussion posts, comments) using `RocksDB` with one
//! column family per collection, plus an in-memory implementation for tests.
//!
//! # Atomicity model
//!
//! Every operation on the [`Store`] trait is atomic with respect to a single
//! document; no operation spans collections atomically. The patch-style
//! operations (`upsert_submission`, `push_comment_id`, the mirror-cleanup
//! scans, …) execute their read-modify-write inside the store so concurrent
//! writers against the same document serialize here rather than in callers.
//! Multi-document sequences (cascading deletes, post-plus-mirror creation)
//! are composed by the service from these per-document steps, each of which
//! is independently idempotent.
//!
//! # Example
//!
//! ```no_run
//! use codeclash_store::{RocksStore, Store};
//! use codeclash_core::User;
//!
//! let store = RocksStore::open("/tmp/codeclash-db").unwrap();
//!
//! let user = User::new("alice", "alice@example.com", "argon2-hash");
//! store.insert_user(&user).unwrap();
//!
//! let found = store.find_user_by_email("alice@example.com").unwrap();
//! assert!(found.is_some());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod keys;
pub mod mem;
pub mod rocks;
pub mod schema;

pub use error::{Result, StoreError};
pub use mem::MemoryStore;
pub use rocks::RocksStore;

use codeclash_core::{
    Comment, CommentId, CommentRef, Contest, ContestId, DiscussionPost, DiscussionRef, PostId,
    SubmissionRecord, User, UserId,
};

/// The storage trait defining all database operations.
///
/// This trait abstracts the storage layer, allowing for different
/// implementations (`RocksDB` for production, in-memory for testing).
pub trait Store: Send + Sync {
    // =========================================================================
    // User Operations
    // =========================================================================

    /// Insert a user document and maintain the email index.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn insert_user(&self, user: &User) -> Result<()>;

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_user(&self, user_id: &UserId) -> Result<Option<User>>;

    /// Look up a user by email (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Insert or replace the user's submission for the record's contest,
    /// atomically against the user document.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the user doesn't exist.
    fn upsert_submission(&self, user_id: &UserId, record: SubmissionRecord) -> Result<()>;

    /// Append a discussion mirror to the user and bump their post counter,
    /// atomically against the user document.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the user doesn't exist.
    fn push_discussion_ref(&self, user_id: &UserId, post: DiscussionRef) -> Result<()>;

    /// Append a comment mirror to the user and bump their comment counter,
    /// atomically against the user document.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the user doesn't exist.
    fn push_comment_ref(&self, user_id: &UserId, comment: CommentRef) -> Result<()>;

    /// Bump the user's contest audit counter.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the user doesn't exist.
    fn increment_contest_count(&self, user_id: &UserId) -> Result<()>;

    /// Remove, from every user, any comment mirror referencing `post_id`.
    ///
    /// Returns the number of user documents modified. Re-running is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn remove_comment_refs_by_post(&self, post_id: &PostId) -> Result<usize>;

    /// Remove, from every user, any discussion mirror referencing `post_id`.
    ///
    /// Returns the number of user documents modified. Re-running is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn remove_discussion_refs_by_post(&self, post_id: &PostId) -> Result<usize>;

    /// Remove, from every user, the comment mirror with the given id.
    ///
    /// Returns the number of user documents modified (0 or 1 in practice,
    /// since a comment has one author).
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn remove_comment_ref(&self, comment_id: &CommentId) -> Result<usize>;

    // =========================================================================
    // Contest Operations
    // =========================================================================

    /// Insert a contest document.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn insert_contest(&self, contest: &Contest) -> Result<()>;

    /// Get a contest by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_contest(&self, contest_id: &ContestId) -> Result<Option<Contest>>;

    /// List all contests, unordered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_contests(&self) -> Result<Vec<Contest>>;

    // =========================================================================
    // Discussion Post Operations
    // =========================================================================

    /// Insert a discussion post document.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn insert_post(&self, post: &DiscussionPost) -> Result<()>;

    /// Get a post by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_post(&self, post_id: &PostId) -> Result<Option<DiscussionPost>>;

    /// List all posts, unordered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_posts(&self) -> Result<Vec<DiscussionPost>>;

    /// Delete a post document. Returns `true` when a document was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn delete_post(&self, post_id: &PostId) -> Result<bool>;

    /// Append a comment id to the post's comment-id set, atomically against
    /// the post document. Re-appending an existing id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the post doesn't exist.
    fn push_comment_id(&self, post_id: &PostId, comment_id: &CommentId) -> Result<()>;

    /// Remove a comment id from the post's comment-id set.
    ///
    /// Returns `false` (rather than an error) when the post is already gone
    /// or the id was not present, so comment deletion can race post deletion.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn pull_comment_id(&self, post_id: &PostId, comment_id: &CommentId) -> Result<bool>;

    // =========================================================================
    // Comment Operations
    // =========================================================================

    /// Insert a comment document.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn insert_comment(&self, comment: &Comment) -> Result<()>;

    /// Get a comment by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_comment(&self, comment_id: &CommentId) -> Result<Option<Comment>>;

    /// List the comments belonging to a post, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn find_comments_by_post(&self, post_id: &PostId) -> Result<Vec<Comment>>;

    /// Delete a comment document. Returns `true` when a document was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn delete_comment(&self, comment_id: &CommentId) -> Result<bool>;

    /// Bulk-delete comments by id. Returns the number actually deleted;
    /// already-deleted ids are skipped, so the operation is retry-safe.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn delete_comments(&self, comment_ids: &[CommentId]) -> Result<usize>;
}
