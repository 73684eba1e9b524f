use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::actor::Actor;
use crate::competition::Competition;
use crate::criteria::CriteriaScore;
use crate::error::TallyError;
use crate::scoring::calculate_total;
use crate::shared::require_id;

/// One judge's scores for one candidate in one competition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Scoresheet {
    pub id: String,
    /// The judge who owns this scoresheet.
    pub user_id: String,
    pub candidate_id: String,
    pub competition_id: String,
    pub scores: Vec<CriteriaScore>,
    /// Always the rounded sum of `scores`.
    #[schema(example = 87.5)]
    pub total: f64,
}

impl Scoresheet {
    fn same_target(&self, submission: &ScoresheetSubmission) -> bool {
        self.user_id == submission.user_id
            && self.candidate_id == submission.candidate_id
            && self.competition_id == submission.competition_id
    }
}

/// A judge's scoresheet as submitted from the scoring view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoresheetSubmission {
    /// Present when the judge is editing a scoresheet they already saved.
    #[serde(default)]
    pub id: Option<String>,
    pub user_id: String,
    pub candidate_id: String,
    pub competition_id: String,
    pub scores: Vec<CriteriaScore>,
    pub total: f64,
}

/// What the storage layer should do with an accepted submission.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmissionPlan {
    /// First submission for this judge, candidate and competition.
    Create(Scoresheet),
    /// Overwrite the judge's existing scoresheet in place.
    Update(Scoresheet),
}

impl SubmissionPlan {
    pub fn scoresheet(&self) -> &Scoresheet {
        match self {
            Self::Create(sheet) | Self::Update(sheet) => sheet,
        }
    }

    pub fn into_scoresheet(self) -> Scoresheet {
        match self {
            Self::Create(sheet) | Self::Update(sheet) => sheet,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Self::Create(_))
    }
}

/// Check a submission on its own: ids present, every score within its
/// criterion's range, and a positive total that matches the scores.
pub fn validate_submission(submission: &ScoresheetSubmission) -> Result<(), TallyError> {
    require_id(&submission.user_id, "User")?;
    require_id(&submission.candidate_id, "Candidate")?;
    require_id(&submission.competition_id, "Competition")?;

    for score in &submission.scores {
        if score.percent.is_nan() || score.percent <= 0.0 {
            return Err(TallyError::Validation(format!(
                "Criterion '{}' must have a positive percent",
                score.criteria_title
            )));
        }
        if !(0.0..=score.percent).contains(&score.score) {
            return Err(TallyError::Validation(format!(
                "Score for '{}' must be between 0 and {}",
                score.criteria_title, score.percent
            )));
        }
    }

    if submission.total.is_nan() || submission.total <= 0.0 {
        return Err(TallyError::validation("Total must be greater than 0"));
    }
    if submission.total != calculate_total(&submission.scores) {
        return Err(TallyError::validation("Total does not match scores"));
    }
    Ok(())
}

/// Check that the submitted scores are exactly the competition's criteria.
fn validate_against_criteria(
    submission: &ScoresheetSubmission,
    competition: &Competition,
) -> Result<(), TallyError> {
    let matches = submission.scores.len() == competition.criteria.len()
        && submission
            .scores
            .iter()
            .zip(&competition.criteria)
            .all(|(score, def)| {
                score.criteria_title == def.criteria_title && score.percent == def.percent
            });
    if matches {
        Ok(())
    } else {
        Err(TallyError::validation(
            "Scores do not match the competition criteria",
        ))
    }
}

/// Decide whether a submission creates a new scoresheet or updates the
/// judge's existing one.
///
/// `existing` is the stored scoresheet for the submission's judge, candidate
/// and competition (or the one named by `submission.id`), if any. A judge
/// can only write their own scoresheet, and only for the active competition.
pub fn plan_submission(
    actor: &Actor,
    competition: &Competition,
    existing: Option<&Scoresheet>,
    submission: ScoresheetSubmission,
) -> Result<SubmissionPlan, TallyError> {
    actor.require_permission("scoresheet:submit")?;
    if actor.user_id != submission.user_id {
        tracing::warn!(
            actor = %actor.user_id,
            owner = %submission.user_id,
            "Rejected scoresheet submitted on behalf of another judge"
        );
        return Err(TallyError::PermissionDenied);
    }

    if competition.id != submission.competition_id {
        return Err(TallyError::validation(
            "Scoresheet does not belong to this competition",
        ));
    }
    if !competition.is_active {
        return Err(TallyError::validation("Competition is not active"));
    }

    validate_submission(&submission)?;
    validate_against_criteria(&submission, competition)?;

    let id = match existing {
        Some(current) => {
            if current.user_id != actor.user_id {
                tracing::warn!(
                    scoresheet_id = %current.id,
                    owner = %current.user_id,
                    actor = %actor.user_id,
                    "Rejected overwrite of another judge's scoresheet"
                );
                return Err(TallyError::PermissionDenied);
            }
            let renamed = submission.id.as_deref().is_some_and(|id| id != current.id);
            if renamed || !current.same_target(&submission) {
                return Err(TallyError::Conflict(
                    "Scoresheet belongs to a different candidate or competition".into(),
                ));
            }
            current.id.clone()
        }
        None => match &submission.id {
            Some(id) => return Err(TallyError::NotFound(format!("Scoresheet {id} not found"))),
            None => Uuid::now_v7().to_string(),
        },
    };

    let sheet = Scoresheet {
        id,
        user_id: submission.user_id,
        candidate_id: submission.candidate_id,
        competition_id: submission.competition_id,
        scores: submission.scores,
        total: submission.total,
    };

    let plan = if existing.is_some() {
        SubmissionPlan::Update(sheet)
    } else {
        SubmissionPlan::Create(sheet)
    };
    let sheet = plan.scoresheet();
    tracing::info!(
        scoresheet_id = %sheet.id,
        candidate_id = %sheet.candidate_id,
        total = sheet.total,
        created = plan.is_new(),
        "Candidate scoresheet accepted"
    );
    Ok(plan)
}

/// Find a candidate's scoresheet for a competition and the total to show
/// on the candidate's card (0 when not scored yet).
pub fn competition_scoresheet<'a>(
    sheets: &'a [Scoresheet],
    competition_id: &str,
) -> (Option<&'a Scoresheet>, f64) {
    if competition_id.is_empty() {
        return (None, 0.0);
    }
    let sheet = sheets.iter().find(|s| s.competition_id == competition_id);
    (sheet, sheet.map_or(0.0, |s| s.total))
}
