//! Fame rating
//!
//! The score is a plain function of interaction counts. Repositories
//! gather the counts inside the transaction that changed them and store
//! the result on the user row.

/// Interaction counters for one user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FameInputs {
    /// Likes received
    pub likes: i64,
    /// Matches the user is part of
    pub matches: i64,
    /// Profile views received
    pub views: i64,
    /// Reports received
    pub reports: i64,
    /// Blocks received
    pub blocks: i64,
    /// See `Profile::is_complete`
    pub profile_complete: bool,
}

const LIKE_WEIGHT: i64 = 1;
const MATCH_WEIGHT: i64 = 3;
const VIEWS_PER_POINT: i64 = 2;
const REPORT_PENALTY: i64 = 5;
const BLOCK_PENALTY: i64 = 2;
const COMPLETION_BONUS: i64 = 5;

/// Compute the fame rating, clamped to `0..=i32::MAX`
pub fn compute_fame(inputs: FameInputs) -> i32 {
    let bonus = if inputs.profile_complete {
        COMPLETION_BONUS
    } else {
        0
    };
    let score = inputs.likes * LIKE_WEIGHT
        + inputs.matches * MATCH_WEIGHT
        + inputs.views / VIEWS_PER_POINT
        - inputs.reports * REPORT_PENALTY
        - inputs.blocks * BLOCK_PENALTY
        + bonus;

    i32::try_from(score.max(0)).unwrap_or(i32::MAX)
}
