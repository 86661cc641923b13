use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Hit,
    Miss,
}

/// Outcome of answering one query. `index` points at the best candidate even
/// when the score stayed under the threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub index: Option<usize>,
    pub score: f32,
    pub decision: Decision,
    pub answer: String,
}

impl MatchResult {
    pub fn is_hit(&self) -> bool {
        self.decision == Decision::Hit
    }
}
