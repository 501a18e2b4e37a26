//! In-memory storage implementation.
//!
//! `MemoryStore` backs the manager unit tests: same trait semantics as
//! [`crate::RocksStore`], with documents held in mutex-guarded maps. The
//! single mutex gives every operation the per-document atomicity the trait
//! contract requires.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use codeclash_core::{
    Comment, CommentId, CommentRef, Contest, ContestId, DiscussionPost, DiscussionRef, PostId,
    SubmissionRecord, User, UserId,
};

use crate::error::{Result, StoreError};
use crate::Store;

#[derive(Default)]
struct Collections {
    users: HashMap<UserId, User>,
    contests: HashMap<ContestId, Contest>,
    posts: HashMap<PostId, DiscussionPost>,
    comments: HashMap<CommentId, Comment>,
}

/// In-memory store for tests.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Collections>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Collections>> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Database("memory store lock poisoned".into()))
    }
}

impl Store for MemoryStore {
    fn insert_user(&self, user: &User) -> Result<()> {
        self.lock()?.users.insert(user.id, user.clone());
        Ok(())
    }

    fn get_user(&self, user_id: &UserId) -> Result<Option<User>> {
        Ok(self.lock()?.users.get(user_id).cloned())
    }

    fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let needle = email.trim().to_lowercase();
        Ok(self
            .lock()?
            .users
            .values()
            .find(|u| u.email.to_lowercase() == needle)
            .cloned())
    }

    fn upsert_submission(&self, user_id: &UserId, record: SubmissionRecord) -> Result<()> {
        let mut inner = self.lock()?;
        let user = inner
            .users
            .get_mut(user_id)
            .ok_or_else(|| StoreError::not_found("user", user_id))?;
        user.upsert_submission(record);
        Ok(())
    }

    fn push_discussion_ref(&self, user_id: &UserId, post: DiscussionRef) -> Result<()> {
        let mut inner = self.lock()?;
        let user = inner
            .users
            .get_mut(user_id)
            .ok_or_else(|| StoreError::not_found("user", user_id))?;
        user.add_discussion_ref(post);
        Ok(())
    }

    fn push_comment_ref(&self, user_id: &UserId, comment: CommentRef) -> Result<()> {
        let mut inner = self.lock()?;
        let user = inner
            .users
            .get_mut(user_id)
            .ok_or_else(|| StoreError::not_found("user", user_id))?;
        user.add_comment_ref(comment);
        Ok(())
    }

    fn increment_contest_count(&self, user_id: &UserId) -> Result<()> {
        let mut inner = self.lock()?;
        let user = inner
            .users
            .get_mut(user_id)
            .ok_or_else(|| StoreError::not_found("user", user_id))?;
        user.contest_created += 1;
        Ok(())
    }

    fn remove_comment_refs_by_post(&self, post_id: &PostId) -> Result<usize> {
        let mut inner = self.lock()?;
        Ok(inner
            .users
            .values_mut()
            .map(|u| u.remove_comment_refs_by_post(post_id))
            .filter(|&removed| removed > 0)
            .count())
    }

    fn remove_discussion_refs_by_post(&self, post_id: &PostId) -> Result<usize> {
        let mut inner = self.lock()?;
        Ok(inner
            .users
            .values_mut()
            .map(|u| u.remove_discussion_refs_by_post(post_id))
            .filter(|&removed| removed > 0)
            .count())
    }

    fn remove_comment_ref(&self, comment_id: &CommentId) -> Result<usize> {
        let mut inner = self.lock()?;
        Ok(inner
            .users
            .values_mut()
            .map(|u| u.remove_comment_ref(comment_id))
            .filter(|&removed| removed)
            .count())
    }

    fn insert_contest(&self, contest: &Contest) -> Result<()> {
        self.lock()?.contests.insert(contest.id, contest.clone());
        Ok(())
    }

    fn get_contest(&self, contest_id: &ContestId) -> Result<Option<Contest>> {
        Ok(self.lock()?.contests.get(contest_id).cloned())
    }

    fn list_contests(&self) -> Result<Vec<Contest>> {
        Ok(self.lock()?.contests.values().cloned().collect())
    }

    fn insert_post(&self, post: &DiscussionPost) -> Result<()> {
        self.lock()?.posts.insert(post.id, post.clone());
        Ok(())
    }

    fn get_post(&self, post_id: &PostId) -> Result<Option<DiscussionPost>> {
        Ok(self.lock()?.posts.get(post_id).cloned())
    }

    fn list_posts(&self) -> Result<Vec<DiscussionPost>> {
        Ok(self.lock()?.posts.values().cloned().collect())
    }

    fn delete_post(&self, post_id: &PostId) -> Result<bool> {
        Ok(self.lock()?.posts.remove(post_id).is_some())
    }

    fn push_comment_id(&self, post_id: &PostId, comment_id: &CommentId) -> Result<()> {
        let mut inner = self.lock()?;
        let post = inner
            .posts
            .get_mut(post_id)
            .ok_or_else(|| StoreError::not_found("post", post_id))?;
        post.add_comment(*comment_id);
        Ok(())
    }

    fn pull_comment_id(&self, post_id: &PostId, comment_id: &CommentId) -> Result<bool> {
        let mut inner = self.lock()?;
        Ok(inner
            .posts
            .get_mut(post_id)
            .is_some_and(|post| post.remove_comment(comment_id)))
    }

    fn insert_comment(&self, comment: &Comment) -> Result<()> {
        self.lock()?.comments.insert(comment.id, comment.clone());
        Ok(())
    }

    fn get_comment(&self, comment_id: &CommentId) -> Result<Option<Comment>> {
        Ok(self.lock()?.comments.get(comment_id).cloned())
    }

    fn find_comments_by_post(&self, post_id: &PostId) -> Result<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .lock()?
            .comments
            .values()
            .filter(|c| c.post_id == *post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }

    fn delete_comment(&self, comment_id: &CommentId) -> Result<bool> {
        Ok(self.lock()?.comments.remove(comment_id).is_some())
    }

    fn delete_comments(&self, comment_ids: &[CommentId]) -> Result<usize> {
        let mut inner = self.lock()?;
        Ok(comment_ids
            .iter()
            .filter(|id| inner.comments.remove(id).is_some())
            .count())
    }
}
