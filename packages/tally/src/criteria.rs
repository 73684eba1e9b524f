use serde::{Deserialize, Serialize};

use crate::error::TallyError;

/// Weights of a competition's criteria must add up to exactly this.
pub const REQUIRED_TOTAL: f64 = 100.0;

/// A named judging dimension and its maximum points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaDefinition {
    #[schema(example = "Talent")]
    pub criteria_title: String,
    /// Maximum points for this criterion, 0-100.
    #[schema(example = 50)]
    pub percent: f64,
}

impl CriteriaDefinition {
    pub fn new(criteria_title: impl Into<String>, percent: f64) -> Self {
        Self {
            criteria_title: criteria_title.into(),
            percent,
        }
    }

    fn is_blank(&self) -> bool {
        self.criteria_title.trim().is_empty() || self.percent == 0.0 || self.percent.is_nan()
    }
}

/// A judge's score for one criterion. Always `0 <= score <= percent`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaScore {
    #[schema(example = "Talent")]
    pub criteria_title: String,
    #[schema(example = 50)]
    pub percent: f64,
    #[serde(default)]
    #[schema(example = 42.5)]
    pub score: f64,
}

impl From<&CriteriaDefinition> for CriteriaScore {
    fn from(def: &CriteriaDefinition) -> Self {
        Self {
            criteria_title: def.criteria_title.clone(),
            percent: def.percent,
            score: 0.0,
        }
    }
}

/// Starting scores for a judge who has not scored the candidate yet.
pub fn blank_scores(criteria: &[CriteriaDefinition]) -> Vec<CriteriaScore> {
    criteria.iter().map(CriteriaScore::from).collect()
}

/// Validate a competition's criteria set.
///
/// Fails with `BlankCriteria` when a title is blank or a weight is zero,
/// and with `InvalidTotal` when the weights do not sum to exactly 100.
/// The sum is compared without tolerance.
pub fn validate_criteria(
    criteria: &[CriteriaDefinition],
) -> Result<&[CriteriaDefinition], TallyError> {
    if let Some(blank) = criteria.iter().position(CriteriaDefinition::is_blank) {
        tracing::debug!(index = blank, "Rejected criteria set with a blank entry");
        return Err(TallyError::BlankCriteria);
    }

    if criteria.iter().any(|c| c.percent < 0.0 || c.percent > REQUIRED_TOTAL) {
        return Err(TallyError::validation(
            "Criteria percent must be between 0 and 100",
        ));
    }

    let total: f64 = criteria.iter().map(|c| c.percent).sum();
    if total != REQUIRED_TOTAL {
        tracing::debug!(total, "Rejected criteria set with invalid total");
        return Err(TallyError::InvalidTotal { total });
    }

    Ok(criteria)
}
