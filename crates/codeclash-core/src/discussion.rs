//! Discussion types for codeclash.
//!
//! The post document is the source of truth for a post's existence and
//! content; the comment document is the source of truth for a comment. Each
//! post additionally carries the ordered set of its comment ids, and each
//! authoring user carries lightweight mirrors of both (see
//! [`crate::user::DiscussionRef`] and [`crate::user::CommentRef`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{CommentId, PostId, UserId};

/// A discussion post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscussionPost {
    /// The post ID.
    pub id: PostId,

    /// Author display name.
    pub name: String,

    /// Owning user.
    pub user_id: UserId,

    /// Post title.
    pub title: String,

    /// Post body.
    pub description: String,

    /// Ids of comments on this post, in insertion order, no duplicates.
    pub comment_ids: Vec<CommentId>,

    /// When the post was created.
    pub created_at: DateTime<Utc>,
}

impl DiscussionPost {
    /// Create a new post with no comments.
    #[must_use]
    pub fn new(
        user_id: UserId,
        name: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: PostId::generate(),
            name: name.into(),
            user_id,
            title: title.into(),
            description: description.into(),
            comment_ids: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Append a comment id, preserving insertion order and set semantics.
    ///
    /// Re-adding an id already present is a no-op, which keeps the operation
    /// safe to retry.
    pub fn add_comment(&mut self, comment_id: CommentId) {
        if !self.comment_ids.contains(&comment_id) {
            self.comment_ids.push(comment_id);
        }
    }

    /// Remove a comment id. Returns `true` when it was present.
    pub fn remove_comment(&mut self, comment_id: &CommentId) -> bool {
        let before = self.comment_ids.len();
        self.comment_ids.retain(|c| c != comment_id);
        before != self.comment_ids.len()
    }
}

/// A comment on a discussion post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// The comment ID.
    pub id: CommentId,

    /// The post this comment belongs to.
    pub post_id: PostId,

    /// Author display name.
    pub name: String,

    /// Comment text.
    pub text: String,

    /// Cached title of the parent post, when supplied at creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_title: Option<String>,

    /// When the comment was created.
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment timestamped now.
    #[must_use]
    pub fn new(
        post_id: PostId,
        name: impl Into<String>,
        text: impl Into<String>,
        post_title: Option<String>,
    ) -> Self {
        Self {
            id: CommentId::generate(),
            post_id,
            name: name.into(),
            text: text.into(),
            post_title,
            created_at: Utc::now(),
        }
    }
}
