//! Contest types for codeclash.
//!
//! Contests are immutable once created: submissions reference them by id and
//! overlay their display fields at read time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::ContestId;

/// A coding contest posted by a company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contest {
    /// The contest ID.
    pub id: ContestId,

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

    /// Difficulty rating.
    pub difficulty: Difficulty,

    /// When the contest is scheduled to run.
    pub contest_date: DateTime<Utc>,

    /// Test cases submissions are evaluated against.
    pub test_cases: Vec<TestCase>,

    /// Worked examples shown to participants.
    pub examples: Vec<WorkedExample>,

    /// Evaluation key handed to the external scorer.
    pub key: String,

    /// Who created the contest.
    pub created_by: String,

    /// When the contest was created.
    pub created_at: DateTime<Utc>,
}

/// An input/output pair a submission must satisfy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    /// Test input.
    pub input: String,

    /// Expected output.
    pub output: String,
}

/// A worked example shown alongside the problem statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkedExample {
    /// Example input.
    pub input: String,

    /// Example output.
    pub output: String,

    /// Optional explanation of how the output follows from the input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Contest difficulty rating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    /// Suitable for beginners.
    Easy,

    /// The default rating.
    #[default]
    Medium,

    /// Expert-level.
    Hard,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_defaults_to_medium() {
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }

    #[test]
    fn difficulty_serializes_as_variant_name() {
        assert_eq!(serde_json::to_string(&Difficulty::Easy).unwrap(), "\"Easy\"");
        let parsed: Difficulty = serde_json::from_str("\"Hard\"").unwrap();
        assert_eq!(parsed, Difficulty::Hard);
    }
}
