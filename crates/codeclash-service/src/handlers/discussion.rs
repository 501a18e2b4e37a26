//! Discussion post and comment handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use codeclash_core::{Comment, CommentId, DiscussionPost, PostId};

use crate::auth::AuthUser;
use crate::discussion;
use crate::error::ApiError;
use crate::state::AppState;

/// Create post request.
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    /// Post title.
    pub title: String,
    /// Post body.
    pub description: String,
}

/// Create comment request.
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    /// Comment text.
    pub text: String,
    /// Optional client-side cache of the post title, kept on the user's
    /// mirror after the post is deleted.
    pub post_title: Option<String>,
}

/// A post together with its resolved comments.
#[derive(Debug, Serialize)]
pub struct PostWithComments {
    /// The post.
    #[serde(flatten)]
    pub post: DiscussionPost,
    /// Comments on the post, in insertion order.
    pub comments: Vec<Comment>,
}

/// Create a discussion post.
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(body): Json<CreatePostRequest>,
) -> Result<Json<DiscussionPost>, ApiError> {
    let user = state
        .store
        .get_user(&auth.user_id)?
        .ok_or(ApiError::Unauthorized)?;

    let post = discussion::create_post(
        state.store.as_ref(),
        auth.user_id,
        &user.name,
        &body.title,
        &body.description,
    )?;
    Ok(Json(post))
}

/// List all discussion posts.
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DiscussionPost>>, ApiError> {
    let mut posts = state.store.list_posts()?;
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(Json(posts))
}

/// Fetch a single post together with its comments.
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<PostId>,
) -> Result<Json<PostWithComments>, ApiError> {
    let post = state
        .store
        .get_post(&post_id)?
        .ok_or_else(|| ApiError::NotFound(format!("post not found: {post_id}")))?;
    let comments = state.store.find_comments_by_post(&post_id)?;
    Ok(Json(PostWithComments { post, comments }))
}

/// Delete a post and cascade to its comments and user mirrors.
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    Path(post_id): Path<PostId>,
) -> Result<Json<discussion::PostDeletion>, ApiError> {
    let outcome = discussion::delete_post(state.store.as_ref(), post_id)?;
    Ok(Json(outcome))
}

/// List a post's comments in thread order.
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<PostId>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    state
        .store
        .get_post(&post_id)?
        .ok_or_else(|| ApiError::NotFound(format!("post not found: {post_id}")))?;
    let comments = state.store.find_comments_by_post(&post_id)?;
    Ok(Json(comments))
}

/// Comment on a post.
pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(post_id): Path<PostId>,
    Json(body): Json<CreateCommentRequest>,
) -> Result<Json<Comment>, ApiError> {
    let user = state
        .store
        .get_user(&auth.user_id)?
        .ok_or(ApiError::Unauthorized)?;

    let comment = discussion::create_comment(
        state.store.as_ref(),
        post_id,
        &user.name,
        &body.text,
        auth.user_id,
        body.post_title,
    )?;
    Ok(Json(comment))
}

/// Delete a single comment, cleaning up any orphaned mirror even when the
/// comment document is already gone.
pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    Path(comment_id): Path<CommentId>,
) -> Result<Json<discussion::CommentDeletion>, ApiError> {
    let outcome = discussion::delete_comment(state.store.as_ref(), comment_id)?;
    Ok(Json(outcome))
}
