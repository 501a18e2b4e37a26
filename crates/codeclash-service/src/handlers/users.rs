//! Per-user read handlers: submission history and the activity feed.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use codeclash_core::{ActivityFeed, SubmissionSummary, UserId};

use crate::error::ApiError;
use crate::state::AppState;
use crate::{activity, submission};

/// List a user's submissions, newest first, with contest details overlaid.
pub async fn list_submissions(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<UserId>,
) -> Result<Json<Vec<SubmissionSummary>>, ApiError> {
    let summaries = submission::list_submissions(state.store.as_ref(), user_id)?;
    Ok(Json(summaries))
}

/// Assemble a user's full activity feed.
pub async fn get_activity(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<UserId>,
) -> Result<Json<ActivityFeed>, ApiError> {
    let feed = activity::user_activity(state.store.as_ref(), user_id)?;
    Ok(Json(feed))
}
