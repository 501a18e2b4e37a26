//! Discussion consistency manager.
//!
//! Owns the three-way relationship between the post collection, the comment
//! collection, and the mirrors embedded in user documents. The store offers
//! no cross-collection transactions, so every multi-document operation here
//! is an ordered sequence of per-document steps, each independently
//! idempotent: a crash mid-sequence leaves a strict prefix applied, and
//! re-running the whole operation converges to the correct final state.
//!
//! Write ordering is deliberate. On delete, the post goes first so a
//! concurrent reader never sees a post whose comments are already gone, and
//! comments go before the mirror-cleanup scans so the scans cannot
//! re-discover them. On comment creation, the comment document goes first so
//! the caller always learns whether the head write committed even when the
//! mirror updates lag.

use serde::Serialize;

use codeclash_core::{Comment, CommentId, CommentRef, DiscussionPost, DiscussionRef, PostId, UserId};
use codeclash_store::Store;

use crate::error::OpError;

/// Outcome of a cascading post deletion, with per-step counts.
#[derive(Debug, Clone, Serialize)]
pub struct PostDeletion {
    /// The deleted post.
    pub post_id: PostId,
    /// How many of the post's comments were deleted.
    pub comments_deleted: usize,
    /// How many users lost a comment mirror.
    pub comment_refs_removed: usize,
    /// How many users lost a discussion mirror.
    pub discussion_refs_removed: usize,
}

/// Outcome of a single comment deletion.
#[derive(Debug, Clone, Serialize)]
pub struct CommentDeletion {
    /// The deleted comment.
    pub comment_id: CommentId,
    /// Whether the parent post still existed and was updated.
    pub parent_updated: bool,
    /// How many users lost the comment mirror (0 or 1).
    pub refs_removed: usize,
}

/// Create a discussion post and mirror it onto the owning user.
///
/// Two writes: (a) insert the post, (b) append a [`DiscussionRef`] to the
/// user and bump their post counter. The post is authoritative — if (b)
/// fails after (a) succeeded, the created post is still returned and the
/// inconsistency is logged; the read path tolerates the missing mirror.
///
/// # Errors
///
/// `Validation` when any field is empty, `NotFound` when the user does not
/// resolve, or a store error from the post insert itself.
pub fn create_post<S>(
    store: &S,
    user_id: UserId,
    name: &str,
    title: &str,
    description: &str,
) -> Result<DiscussionPost, OpError>
where
    S: Store + ?Sized,
{
    require_field(name, "name")?;
    require_field(title, "title")?;
    require_field(description, "description")?;

    store
        .get_user(&user_id)?
        .ok_or_else(|| OpError::not_found("user", user_id))?;

    let post = DiscussionPost::new(user_id, name, title, description);
    store.insert_post(&post)?;

    let mirror = DiscussionRef {
        post_id: post.id,
        title: post.title.clone(),
        description: post.description.clone(),
        created_at: post.created_at,
    };
    if let Err(e) = store.push_discussion_ref(&user_id, mirror) {
        tracing::warn!(
            post_id = %post.id,
            user_id = %user_id,
            error = %e,
            "post created but user mirror append failed; mirror is eventually consistent"
        );
    }

    tracing::info!(post_id = %post.id, user_id = %user_id, "discussion post created");
    Ok(post)
}

/// Create a comment on a post and mirror it onto the post and the user.
///
/// Three writes, in order: insert the comment document; append its id to the
/// parent post's comment-id set; append a [`CommentRef`] to the user and
/// bump their comment counter. A failure after the first write surfaces to
/// the caller, with the already-applied prefix left in place.
///
/// `post_title` is an optional caller-supplied cache of the post's title,
/// kept on the mirror as a fallback for the read path once the post is gone.
///
/// # Errors
///
/// `Validation` for empty name/text, `NotFound` when the post or the user
/// does not resolve (distinguished), or a store error.
pub fn create_comment<S>(
    store: &S,
    post_id: PostId,
    name: &str,
    text: &str,
    user_id: UserId,
    post_title: Option<String>,
) -> Result<Comment, OpError>
where
    S: Store + ?Sized,
{
    require_field(name, "name")?;
    require_field(text, "text")?;

    store
        .get_post(&post_id)?
        .ok_or_else(|| OpError::not_found("post", post_id))?;
    store
        .get_user(&user_id)?
        .ok_or_else(|| OpError::not_found("user", user_id))?;

    let comment = Comment::new(post_id, name, text, post_title);
    store.insert_comment(&comment)?;
    store.push_comment_id(&post_id, &comment.id)?;
    store.push_comment_ref(
        &user_id,
        CommentRef {
            comment_id: comment.id,
            post_id,
            text: comment.text.clone(),
            post_title: comment.post_title.clone(),
            created_at: comment.created_at,
        },
    )?;

    tracing::info!(comment_id = %comment.id, post_id = %post_id, user_id = %user_id, "comment created");
    Ok(comment)
}

/// Cascading post deletion.
///
/// Once the post is confirmed to exist, the steps run unconditionally:
/// capture the post's comment ids; delete the post; bulk-delete the captured
/// comments; strip matching comment mirrors from every user; strip matching
/// discussion mirrors from every user. Best-effort, not transactional — but
/// every step is a no-op when re-applied, so retrying after a partial
/// failure completes the cascade.
///
/// # Errors
///
/// `NotFound` when the post does not exist, or a store error from whichever
/// step failed first.
pub fn delete_post<S>(store: &S, post_id: PostId) -> Result<PostDeletion, OpError>
where
    S: Store + ?Sized,
{
    let post = store
        .get_post(&post_id)?
        .ok_or_else(|| OpError::not_found("post", post_id))?;
    let comment_ids = post.comment_ids;

    store.delete_post(&post_id)?;
    let comments_deleted = store.delete_comments(&comment_ids)?;
    let comment_refs_removed = store.remove_comment_refs_by_post(&post_id)?;
    let discussion_refs_removed = store.remove_discussion_refs_by_post(&post_id)?;

    tracing::info!(
        post_id = %post_id,
        comments_deleted,
        comment_refs_removed,
        discussion_refs_removed,
        "discussion post cascade-deleted"
    );

    Ok(PostDeletion {
        post_id,
        comments_deleted,
        comment_refs_removed,
        discussion_refs_removed,
    })
}

/// Delete a single comment, or clean up after one that is already gone.
///
/// Comment deletion can race post deletion, so this has two paths:
///
/// - Comment missing: scan users for a stale [`CommentRef`] with this id and
///   remove it (a post cascade may have deleted the comment while an
///   embedded mirror survived), then report `NotFound` for the comment
///   itself. The cleanup side effect is real even though the result is an
///   error.
/// - Comment present: delete it; pull its id from the parent post's set,
///   tolerating the post already being gone; strip the mirror from every
///   user holding one.
///
/// # Errors
///
/// `NotFound` when the comment does not exist (after orphan cleanup), or a
/// store error.
pub fn delete_comment<S>(store: &S, comment_id: CommentId) -> Result<CommentDeletion, OpError>
where
    S: Store + ?Sized,
{
    let Some(comment) = store.get_comment(&comment_id)? else {
        // Orphan cleanup: the comment may have been removed by a post
        // cascade while a stale mirror survived on its author.
        let refs_removed = store.remove_comment_ref(&comment_id)?;
        if refs_removed > 0 {
            tracing::info!(comment_id = %comment_id, refs_removed, "removed orphaned comment mirror");
        }
        return Err(OpError::not_found("comment", comment_id));
    };

    store.delete_comment(&comment_id)?;
    let parent_updated = store.pull_comment_id(&comment.post_id, &comment_id)?;
    let refs_removed = store.remove_comment_ref(&comment_id)?;

    tracing::info!(
        comment_id = %comment_id,
        post_id = %comment.post_id,
        parent_updated,
        refs_removed,
        "comment deleted"
    );

    Ok(CommentDeletion {
        comment_id,
        parent_updated,
        refs_removed,
    })
}

fn require_field(value: &str, field: &'static str) -> Result<(), OpError> {
    if value.trim().is_empty() {
        return Err(OpError::Validation(format!("missing required field: {field}")));
    }
    Ok(())
}
