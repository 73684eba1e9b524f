use serde::{Deserialize, Serialize};

use crate::criteria::{CriteriaDefinition, CriteriaScore, blank_scores};

/// Raw score as entered by a judge: a slider position or the text box contents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(untagged)]
pub enum ScoreInput {
    Number(f64),
    Text(String),
}

impl ScoreInput {
    /// Numeric value of the input. Text that does not parse as a finite
    /// number, and NaN itself, reads as 0.
    pub fn value(&self) -> f64 {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => {
                let s = s.trim();
                match s.parse::<f64>() {
                    // rejects "inf" and "infinity", which `parse` accepts
                    Ok(n) if n.is_finite() => n,
                    _ => 0.0,
                }
            }
        };
        if value.is_nan() { 0.0 } else { value }
    }
}

impl From<f64> for ScoreInput {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for ScoreInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ScoreInput {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Result of changing one criterion's score.
#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
pub struct ScoreUpdate {
    pub criteria: Vec<CriteriaScore>,
    /// Sum of all scores, rounded to one decimal.
    pub total: f64,
}

/// Round to one decimal place, halves away from zero.
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Constrain `raw` to `[0, percent]`.
pub fn clamp_score(raw: f64, percent: f64) -> f64 {
    let raw = if raw.is_nan() { 0.0 } else { raw };
    raw.max(0.0).min(percent.max(0.0))
}

/// Sum of all scores, rounded to one decimal. An empty list totals 0.
pub fn calculate_total(scores: &[CriteriaScore]) -> f64 {
    let sum: f64 = scores
        .iter()
        .map(|s| if s.score.is_nan() { 0.0 } else { s.score })
        .sum();
    round1(sum)
}

/// Set the score of the criterion at `index` and recompute the total.
///
/// The input list is left untouched; the returned list differs from it only
/// at `index`.
///
/// # Panics
///
/// Panics if `index` is out of bounds. Callers index into the criteria they
/// rendered, so an out-of-range index is a programming error.
pub fn set_score(
    criteria: &[CriteriaScore],
    index: usize,
    raw: impl Into<ScoreInput>,
) -> ScoreUpdate {
    assert!(
        index < criteria.len(),
        "criterion index {index} out of range for {} criteria",
        criteria.len()
    );

    let mut updated = criteria.to_vec();
    let target = &mut updated[index];
    target.score = clamp_score(raw.into().value(), target.percent);

    let total = calculate_total(&updated);
    ScoreUpdate {
        criteria: updated,
        total,
    }
}

/// Running scoresheet state for callers that keep it across edits.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreAggregator {
    scores: Vec<CriteriaScore>,
    total: f64,
}

impl ScoreAggregator {
    /// Resume from previously saved scores.
    pub fn new(scores: Vec<CriteriaScore>) -> Self {
        let total = calculate_total(&scores);
        Self { scores, total }
    }

    /// Start a fresh scoresheet for a competition's criteria.
    pub fn from_definitions(criteria: &[CriteriaDefinition]) -> Self {
        Self::new(blank_scores(criteria))
    }

    /// Apply one edit and return the clamped score that was stored.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn set(&mut self, index: usize, raw: impl Into<ScoreInput>) -> f64 {
        let update = set_score(&self.scores, index, raw);
        self.scores = update.criteria;
        self.total = update.total;
        self.scores[index].score
    }

    pub fn scores(&self) -> &[CriteriaScore] {
        &self.scores
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn into_update(self) -> ScoreUpdate {
        ScoreUpdate {
            criteria: self.scores,
            total: self.total,
        }
    }
}
