//! Submission manager.
//!
//! Maintains each user's embedded list of contest submissions, keyed by
//! (user, contest) with upsert semantics: resubmitting a contest replaces the
//! existing record in place rather than appending. The upsert runs inside the
//! store's atomic per-user-document update, so two submits by the same user
//! serialize in the store while submits by different users never contend.

use codeclash_core::{Contest, ContestId, SubmissionRecord, SubmissionSummary, UserId};
use codeclash_store::Store;

use crate::error::OpError;

/// Record a contest submission for a user, replacing any previous submission
/// for the same contest.
///
/// Returns a summary sized for the response payload: contest display fields
/// plus the outcome, never the submitted code or the full list.
///
/// # Errors
///
/// `NotFound` when the user or the contest does not resolve (distinguished),
/// or a store error.
pub fn submit<S>(
    store: &S,
    user_id: UserId,
    contest_id: ContestId,
    code: String,
    language: String,
    successful: bool,
) -> Result<SubmissionSummary, OpError>
where
    S: Store + ?Sized,
{
    let user = store
        .get_user(&user_id)?
        .ok_or_else(|| OpError::not_found("user", user_id))?;
    let contest = store
        .get_contest(&contest_id)?
        .ok_or_else(|| OpError::not_found("contest", contest_id))?;

    let record = SubmissionRecord::new(contest_id, code, language, successful);
    let summary = overlay(&record, Some(&contest));
    store.upsert_submission(&user.id, record)?;

    tracing::info!(
        user_id = %user_id,
        contest_id = %contest_id,
        successful,
        "submission recorded"
    );

    Ok(summary)
}

/// List a user's submissions with contest display fields overlaid, newest
/// first.
///
/// A submission whose contest no longer exists keeps its entry; the overlay
/// fields are simply absent. Ties on the timestamp keep their original list
/// order (the sort is stable).
///
/// # Errors
///
/// `NotFound` when the user does not resolve, or a store error.
pub fn list_submissions<S>(store: &S, user_id: UserId) -> Result<Vec<SubmissionSummary>, OpError>
where
    S: Store + ?Sized,
{
    let user = store
        .get_user(&user_id)?
        .ok_or_else(|| OpError::not_found("user", user_id))?;
    contest_overlays(store, &user.submissions)
}

/// Join submission records against the contest collection, newest first.
///
/// Shared between [`list_submissions`] and the activity aggregator.
pub(crate) fn contest_overlays<S>(
    store: &S,
    submissions: &[SubmissionRecord],
) -> Result<Vec<SubmissionSummary>, OpError>
where
    S: Store + ?Sized,
{
    let mut summaries = Vec::with_capacity(submissions.len());
    for record in submissions {
        let contest = store.get_contest(&record.contest_id)?;
        summaries.push(overlay(record, contest.as_ref()));
    }
    summaries.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
    Ok(summaries)
}

/// Build a summary from a record and, when it still resolves, its contest.
fn overlay(record: &SubmissionRecord, contest: Option<&Contest>) -> SubmissionSummary {
    SubmissionSummary {
        contest_id: record.contest_id,
        title: contest.map(|c| c.title.clone()),
        company: contest.map(|c| c.company.clone()),
        reward: contest.map(|c| c.reward.clone()),
        short_description: contest.map(|c| c.short_description.clone()),
        difficulty: contest.map(|c| c.difficulty),
        language: record.language.clone(),
        successful: record.successful,
        submitted_at: record.submitted_at,
    }
}
