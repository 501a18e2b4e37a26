//! Core types for the codeclash platform.
//!
//! This crate provides the domain types shared by the storage layer and the
//! HTTP service:
//!
//! - **Identifiers**: `UserId`, `ContestId`, `PostId`, `CommentId`
//! - **Users**: `User` with embedded `SubmissionRecord`, `DiscussionRef`,
//!   `CommentRef` mirrors
//! - **Contests**: `Contest`, `TestCase`, `WorkedExample`, `Difficulty`
//! - **Discussions**: `DiscussionPost`, `Comment`
//! - **Activity views**: `ActivityFeed`, `SubmissionSummary` and friends
//!
//! # Denormalization
//!
//! User activity is deliberately denormalized: the user document mirrors a
//! slice of the contest/post/comment collections it references. The mutation
//! helpers on `User` and `DiscussionPost` preserve the local invariants (at
//! most one submission per contest, comment-id set semantics, monotonic audit
//! counters); cross-collection consistency is the service's job.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod activity;
pub mod contest;
pub mod discussion;
pub mod ids;
pub mod user;

pub use activity::{
    ActivityFeed, CommentActivity, DiscussionActivity, SubmissionSummary, DELETED_POST_TITLE,
    FALLBACK_POST_TITLE,
};
pub use contest::{Contest, Difficulty, TestCase, WorkedExample};
pub use discussion::{Comment, DiscussionPost};
pub use ids::{CommentId, ContestId, IdError, PostId, UserId};
pub use user::{CommentRef, DiscussionRef, SubmissionRecord, User};
