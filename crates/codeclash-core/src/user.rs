//! User types for codeclash.
//!
//! A user document carries, besides identity and credentials, three embedded
//! activity lists: contest submissions, discussion-post mirrors, and comment
//! mirrors. The mirrors duplicate a small slice of their source collections so
//! the common "my activity" read path does not need a join; the write paths in
//! the service keep them best-effort consistent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{CommentId, ContestId, PostId, UserId};

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// The user ID.
    pub id: UserId,

    /// Display name.
    pub name: String,

    /// Email address (unique).
    pub email: String,

    /// Opaque password hash. Never serialized into API responses.
    pub password_hash: String,

    /// Monotonic audit count of discussion posts created.
    ///
    /// Never decremented on delete; this counts actions, not live documents.
    pub post_created: u64,

    /// Monotonic audit count of contests created.
    pub contest_created: u64,

    /// Monotonic audit count of comments created.
    pub comment_created: u64,

    /// Contest submissions, at most one per contest (see [`User::upsert_submission`]).
    pub submissions: Vec<SubmissionRecord>,

    /// Mirrors of discussion posts this user authored.
    pub discussion_refs: Vec<DiscussionRef>,

    /// Mirrors of comments this user authored.
    pub comment_refs: Vec<CommentRef>,

    /// When the user registered.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with empty activity lists and zeroed counters.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: UserId::generate(),
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            post_created: 0,
            contest_created: 0,
            comment_created: 0,
            submissions: Vec::new(),
            discussion_refs: Vec::new(),
            comment_refs: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Insert or replace the submission for `record.contest_id`.
    ///
    /// At most one record exists per contest: a repeat submission overwrites
    /// the existing entry in place, preserving its position in the list.
    /// Returns `true` when an existing record was replaced.
    pub fn upsert_submission(&mut self, record: SubmissionRecord) -> bool {
        if let Some(existing) = self
            .submissions
            .iter_mut()
            .find(|s| s.contest_id == record.contest_id)
        {
            *existing = record;
            true
        } else {
            self.submissions.push(record);
            false
        }
    }

    /// Append a discussion mirror and bump the post audit counter.
    pub fn add_discussion_ref(&mut self, post: DiscussionRef) {
        self.discussion_refs.push(post);
        self.post_created += 1;
    }

    /// Append a comment mirror and bump the comment audit counter.
    pub fn add_comment_ref(&mut self, comment: CommentRef) {
        self.comment_refs.push(comment);
        self.comment_created += 1;
    }

    /// Remove every comment mirror pointing at `post_id`.
    ///
    /// Counters are untouched: they are audit counts, not live cardinalities.
    /// Returns the number of mirrors removed.
    pub fn remove_comment_refs_by_post(&mut self, post_id: &PostId) -> usize {
        let before = self.comment_refs.len();
        self.comment_refs.retain(|c| c.post_id != *post_id);
        before - self.comment_refs.len()
    }

    /// Remove every discussion mirror pointing at `post_id`.
    ///
    /// Returns the number of mirrors removed.
    pub fn remove_discussion_refs_by_post(&mut self, post_id: &PostId) -> usize {
        let before = self.discussion_refs.len();
        self.discussion_refs.retain(|d| d.post_id != *post_id);
        before - self.discussion_refs.len()
    }

    /// Remove the comment mirror with the given comment id, if present.
    ///
    /// Returns `true` when a mirror was removed.
    pub fn remove_comment_ref(&mut self, comment_id: &CommentId) -> bool {
        let before = self.comment_refs.len();
        self.comment_refs.retain(|c| c.comment_id != *comment_id);
        before != self.comment_refs.len()
    }
}

/// A contest submission embedded in the user document.
///
/// Unique per (user, contest): resubmitting replaces the record in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionRecord {
    /// The contest this submission targets.
    pub contest_id: ContestId,

    /// Submitted source code.
    pub code: String,

    /// Language the code is written in.
    pub language: String,

    /// Whether the submission passed evaluation.
    pub successful: bool,

    /// When the submission (or resubmission) happened.
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionRecord {
    /// Create a submission record timestamped now.
    #[must_use]
    pub fn new(
        contest_id: ContestId,
        code: impl Into<String>,
        language: impl Into<String>,
        successful: bool,
    ) -> Self {
        Self {
            contest_id,
            code: code.into(),
            language: language.into(),
            successful,
            submitted_at: Utc::now(),
        }
    }
}

/// A lightweight mirror of a discussion post authored by the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscussionRef {
    /// The mirrored post.
    pub post_id: PostId,

    /// Post title at creation time.
    pub title: String,

    /// Post description at creation time.
    pub description: String,

    /// When the post was created.
    pub created_at: DateTime<Utc>,
}

/// A lightweight mirror of a comment authored by the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRef {
    /// The mirrored comment.
    pub comment_id: CommentId,

    /// The post the comment belongs to.
    pub post_id: PostId,

    /// Comment text.
    pub text: String,

    /// Cached title of the parent post, when the caller supplied one.
    /// Used as a fallback on the read path once the post is gone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_title: Option<String>,

    /// When the comment was created.
    pub created_at: DateTime<Utc>,
}
