//! Activity aggregation across a user's mirrors.
//!
//! Builds the per-user activity feed by joining the mirrors embedded in the
//! user document against the live contest and post collections. Dangling
//! references are expected here, not errors: the write path deliberately
//! tolerates partial mirror cleanup, so this read path substitutes sentinel
//! titles instead of dropping entries.

use codeclash_core::{
    ActivityFeed, CommentActivity, DiscussionActivity, UserId, DELETED_POST_TITLE,
    FALLBACK_POST_TITLE,
};
use codeclash_store::Store;

use crate::error::OpError;
use crate::submission;

/// Assemble the full activity feed for a user.
///
/// Each of the three sections is sorted newest first, with insertion order
/// preserved among equal timestamps.
///
/// # Errors
///
/// `NotFound` when the user does not resolve, or a store error.
pub fn user_activity<S>(store: &S, user_id: UserId) -> Result<ActivityFeed, OpError>
where
    S: Store + ?Sized,
{
    let user = store
        .get_user(&user_id)?
        .ok_or_else(|| OpError::not_found("user", user_id))?;

    let contests = submission::contest_overlays(store, &user.submissions)?;

    let mut discussions: Vec<DiscussionActivity> = Vec::with_capacity(user.discussion_refs.len());
    for dref in &user.discussion_refs {
        let entry = match store.get_post(&dref.post_id)? {
            Some(post) => DiscussionActivity {
                post_id: dref.post_id,
                title: post.title,
                description: post.description,
                created_at: dref.created_at,
            },
            // The post is gone but the mirror survived; keep the entry so
            // the feed still reflects that the user posted.
            None => DiscussionActivity {
                post_id: dref.post_id,
                title: DELETED_POST_TITLE.to_owned(),
                description: String::new(),
                created_at: dref.created_at,
            },
        };
        discussions.push(entry);
    }
    discussions.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let mut comments: Vec<CommentActivity> = Vec::with_capacity(user.comment_refs.len());
    for cref in &user.comment_refs {
        // Title resolution chain: live post, then the title cached on the
        // mirror at write time, then the generic fallback.
        let post_title = match store.get_post(&cref.post_id)? {
            Some(post) => post.title,
            None => cref
                .post_title
                .clone()
                .unwrap_or_else(|| FALLBACK_POST_TITLE.to_owned()),
        };
        comments.push(CommentActivity {
            comment_id: cref.comment_id,
            post_id: cref.post_id,
            post_title,
            text: cref.text.clone(),
            created_at: cref.created_at,
        });
    }
    comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(ActivityFeed {
        contests,
        discussions,
        comments,
    })
}
