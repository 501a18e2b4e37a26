//! Contest handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use codeclash_core::{Contest, ContestId, Difficulty, SubmissionSummary, TestCase, WorkedExample};

use crate::auth::AuthUser;
use crate::error::{ApiError, OpError};
use crate::state::AppState;
use crate::submission;

/// Create contest request.
#[derive(Debug, Deserialize)]
pub struct CreateContestRequest {
    /// Contest title.
    pub title: String,
    /// Sponsoring company.
    pub company: String,
    /// Reward offered to the winner.
    pub reward: String,
    /// One-line description shown in listings.
    pub short_description: String,
    /// Full problem statement.
    pub problem_explanation: String,
    /// Difficulty rating; defaults to medium.
    #[serde(default)]
    pub difficulty: Difficulty,
    /// When the contest is scheduled to run.
    pub contest_date: DateTime<Utc>,
    /// Test cases submissions are evaluated against.
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
    /// Worked examples shown to participants.
    #[serde(default)]
    pub examples: Vec<WorkedExample>,
    /// Evaluation key handed to the external scorer.
    pub key: String,
}

/// Contest summary for listings. Omits the evaluation key and the full
/// test-case set.
#[derive(Debug, Serialize)]
pub struct ContestSummary {
    /// Contest ID.
    pub id: String,
    /// Contest title.
    pub title: String,
    /// Sponsoring company.
    pub company: String,
    /// Reward offered to the winner.
    pub reward: String,
    /// One-line description.
    pub short_description: String,
    /// Difficulty rating.
    pub difficulty: Difficulty,
    /// When the contest is scheduled to run.
    pub contest_date: DateTime<Utc>,
}

impl From<&Contest> for ContestSummary {
    fn from(contest: &Contest) -> Self {
        Self {
            id: contest.id.to_string(),
            title: contest.title.clone(),
            company: contest.company.clone(),
            reward: contest.reward.clone(),
            short_description: contest.short_description.clone(),
            difficulty: contest.difficulty,
            contest_date: contest.contest_date,
        }
    }
}

/// Create a new contest.
pub async fn create_contest(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(body): Json<CreateContestRequest>,
) -> Result<Json<Contest>, ApiError> {
    if body.title.trim().is_empty()
        || body.problem_explanation.trim().is_empty()
        || body.key.trim().is_empty()
    {
        return Err(ApiError::BadRequest(
            "title, problem_explanation and key are required".into(),
        ));
    }

    let user = state
        .store
        .get_user(&auth.user_id)?
        .ok_or(ApiError::Unauthorized)?;

    let contest = Contest {
        id: ContestId::generate(),
        title: body.title,
        company: body.company,
        reward: body.reward,
        short_description: body.short_description,
        problem_explanation: body.problem_explanation,
        difficulty: body.difficulty,
        contest_date: body.contest_date,
        test_cases: body.test_cases,
        examples: body.examples,
        key: body.key,
        created_by: user.name,
        created_at: Utc::now(),
    };
    state.store.insert_contest(&contest)?;
    state.store.increment_contest_count(&auth.user_id)?;

    tracing::info!(contest_id = %contest.id, user_id = %auth.user_id, "contest created");
    Ok(Json(contest))
}

/// List all contests as summaries.
pub async fn list_contests(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ContestSummary>>, ApiError> {
    let mut contests = state.store.list_contests()?;
    contests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(Json(contests.iter().map(ContestSummary::from).collect()))
}

/// Fetch a single contest in full.
pub async fn get_contest(
    State(state): State<Arc<AppState>>,
    Path(contest_id): Path<ContestId>,
) -> Result<Json<Contest>, ApiError> {
    let contest = state
        .store
        .get_contest(&contest_id)?
        .ok_or_else(|| OpError::not_found("contest", contest_id))
        .map_err(ApiError::from)?;
    Ok(Json(contest))
}

/// Submission request body.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    /// Submitted source code.
    pub code: String,
    /// Language the code is written in.
    pub language: String,
    /// Whether the submission passed evaluation.
    pub successful: bool,
}

/// Submit a solution to a contest. Resubmitting replaces the previous
/// attempt for the same contest.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(contest_id): Path<ContestId>,
    Json(body): Json<SubmitRequest>,
) -> Result<Json<SubmissionSummary>, ApiError> {
    let summary = submission::submit(
        state.store.as_ref(),
        auth.user_id,
        contest_id,
        body.code,
        body.language,
        body.successful,
    )?;
    Ok(Json(summary))
}
