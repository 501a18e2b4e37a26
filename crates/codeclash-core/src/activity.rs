//! Read-side activity views.
//!
//! These types are what the aggregation read path produces after joining the
//! user's embedded mirrors against their source collections. Overlay fields
//! are `Option` so a missing source document degrades to absent fields rather
//! than failing the whole list; deleted posts degrade to sentinel titles so a
//! user's history is never silently dropped.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::contest::Difficulty;
use crate::ids::{CommentId, ContestId, PostId};

// ============================================================================
// Sentinels
// ============================================================================

/// Title substituted for a discussion entry whose post no longer exists.
pub const DELETED_POST_TITLE: &str = "Deleted Post";

/// Title substituted for a comment entry with no live post and no cached title.
pub const FALLBACK_POST_TITLE: &str = "Discussion Post";

/// A contest submission with contest display fields overlaid.
///
/// The submitted code is deliberately excluded: summaries are sized for list
/// responses. Overlay fields are absent when the contest no longer resolves.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionSummary {
    /// The contest submitted against.
    pub contest_id: ContestId,

    /// Contest title, when the contest still exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Sponsoring company.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    /// Contest reward.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward: Option<String>,

    /// Contest short description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,

    /// Contest difficulty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,

    /// Language of the submission.
    pub language: String,

    /// Whether the submission passed evaluation.
    pub successful: bool,

    /// When the submission happened.
    pub submitted_at: DateTime<Utc>,
}

/// A discussion entry in the activity feed.
#[derive(Debug, Clone, Serialize)]
pub struct DiscussionActivity {
    /// The referenced post (which may no longer exist).
    pub post_id: PostId,

    /// Live post title, or [`DELETED_POST_TITLE`].
    pub title: String,

    /// Live post description, or empty when the post is gone.
    pub description: String,

    /// When the post was created.
    pub created_at: DateTime<Utc>,
}

/// A comment entry in the activity feed.
#[derive(Debug, Clone, Serialize)]
pub struct CommentActivity {
    /// The comment id.
    pub comment_id: CommentId,

    /// The post commented on.
    pub post_id: PostId,

    /// Comment text.
    pub text: String,

    /// Live post title, falling back to the mirror's cached title, then to
    /// [`FALLBACK_POST_TITLE`].
    pub post_title: String,

    /// When the comment was created.
    pub created_at: DateTime<Utc>,
}

/// The unified activity feed for one user.
///
/// Each list is independently sorted by its timestamp, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityFeed {
    /// Contest submissions with contest overlays.
    pub contests: Vec<SubmissionSummary>,

    /// Discussion posts authored.
    pub discussions: Vec<DiscussionActivity>,

    /// Comments authored.
    pub comments: Vec<CommentActivity>,
}
