//! Key encoding utilities for `RocksDB`.
//!
//! Document keys are the raw 16 bytes of the document's UUID. The email
//! index keys by the lowercased email so lookups are case-insensitive.

use codeclash_core::{CommentId, ContestId, PostId, UserId};

/// Create a user key from a user ID.
#[must_use]
pub fn user_key(user_id: &UserId) -> Vec<u8> {
    user_id.as_bytes().to_vec()
}

/// Create an email index key. Emails are compared case-insensitively.
#[must_use]
pub fn email_key(email: &str) -> Vec<u8> {
    email.trim().to_lowercase().into_bytes()
}

/// Create a contest key from a contest ID.
#[must_use]
pub fn contest_key(contest_id: &ContestId) -> Vec<u8> {
    contest_id.as_bytes().to_vec()
}

/// Create a post key from a post ID.
#[must_use]
pub fn post_key(post_id: &PostId) -> Vec<u8> {
    post_id.as_bytes().to_vec()
}

/// Create a comment key from a comment ID.
#[must_use]
pub fn comment_key(comment_id: &CommentId) -> Vec<u8> {
    comment_id.as_bytes().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_keys_are_16_bytes() {
        assert_eq!(user_key(&UserId::generate()).len(), 16);
        assert_eq!(contest_key(&ContestId::generate()).len(), 16);
        assert_eq!(post_key(&PostId::generate()).len(), 16);
        assert_eq!(comment_key(&CommentId::generate()).len(), 16);
    }

    #[test]
    fn email_key_normalizes_case_and_whitespace() {
        assert_eq!(email_key(" Alice@Example.COM "), email_key("alice@example.com"));
    }
}
