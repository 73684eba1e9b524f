use common::Listable;
use serde::{Deserialize, Serialize};

use crate::criteria::{CriteriaDefinition, validate_criteria};
use crate::error::TallyError;
use crate::shared::{require_id, validate_number, validate_title};

/// A judged competition within an event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Competition {
    pub id: String,
    pub event_id: String,
    /// Display order within the event.
    #[schema(example = 1)]
    pub number: u32,
    #[schema(example = "Talent Portion")]
    pub name: String,
    /// Weight of this competition in the event standings.
    #[schema(example = 1.0)]
    pub multiplier: f64,
    /// How many top candidates advance. 0 means no cut.
    #[serde(default)]
    pub finalists: u32,
    /// Whether this is a finals round rather than a preliminary one.
    #[serde(default)]
    pub is_finalist: bool,
    pub criteria: Vec<CriteriaDefinition>,
    #[serde(default)]
    pub is_active: bool,
}

impl Listable for Competition {
    fn sort_key(&self) -> &str {
        &self.name
    }
}

/// Request body for creating or updating a competition.
#[derive(Clone, Debug, PartialEq, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionRequest {
    pub event_id: String,
    pub number: u32,
    pub name: String,
    pub multiplier: f64,
    #[serde(default)]
    pub finalists: u32,
    #[serde(default)]
    pub is_finalist: bool,
    pub criteria: Vec<CriteriaDefinition>,
}

impl CompetitionRequest {
    /// Build a new competition. New competitions start inactive.
    pub fn into_competition(self, id: impl Into<String>) -> Competition {
        Competition {
            id: id.into(),
            event_id: self.event_id,
            number: self.number,
            name: self.name.trim().to_string(),
            multiplier: self.multiplier,
            finalists: self.finalists,
            is_finalist: self.is_finalist,
            criteria: self.criteria,
            is_active: false,
        }
    }
}

impl Competition {
    /// Apply an update. The event and the active flag are not changed here.
    pub fn apply(&mut self, req: CompetitionRequest) {
        self.number = req.number;
        self.name = req.name.trim().to_string();
        self.multiplier = req.multiplier;
        self.finalists = req.finalists;
        self.is_finalist = req.is_finalist;
        self.criteria = req.criteria;
    }
}

pub fn validate_competition(req: &CompetitionRequest) -> Result<(), TallyError> {
    require_id(&req.event_id, "Event")?;
    validate_title(&req.name, "Competition name")?;
    validate_number(req.number, "Competition")?;
    if !req.multiplier.is_finite() || req.multiplier <= 0.0 {
        return Err(TallyError::validation("Multiplier must be greater than 0"));
    }
    validate_criteria(&req.criteria)?;
    Ok(())
}

/// Reject a competition whose name or number is already used in its event.
///
/// `exclude_id` is the competition being updated, which may keep its own
/// name and number.
pub fn find_conflict(
    existing: &[Competition],
    req: &CompetitionRequest,
    exclude_id: Option<&str>,
) -> Result<(), TallyError> {
    let name = req.name.trim();
    let clash = existing.iter().find(|c| {
        c.event_id == req.event_id
            && Some(c.id.as_str()) != exclude_id
            && (c.name == name || c.number == req.number)
    });

    match clash {
        Some(c) => {
            tracing::debug!(existing_id = %c.id, name, number = req.number, "Competition conflict");
            Err(TallyError::Conflict(
                "Competition name/number already exists".into(),
            ))
        }
        None => Ok(()),
    }
}

/// Activate or deactivate a competition.
///
/// Every other competition is deactivated either way, so at most one
/// competition is active across all events.
pub fn toggle_active(
    competitions: &mut [Competition],
    id: &str,
    is_active: bool,
) -> Result<Competition, TallyError> {
    if !competitions.iter().any(|c| c.id == id) {
        return Err(TallyError::NotFound("Competition not found".into()));
    }

    let mut toggled = None;
    for competition in competitions.iter_mut() {
        competition.is_active = competition.id == id && is_active;
        if competition.id == id {
            toggled = Some(competition.clone());
        }
    }

    let toggled = toggled.ok_or_else(|| TallyError::NotFound("Competition not found".into()))?;
    tracing::info!(
        competition_id = %toggled.id,
        name = %toggled.name,
        "Competition {}",
        if is_active { "activated" } else { "deactivated" }
    );
    Ok(toggled)
}

/// The active competition of an event, if any.
pub fn active_competition<'a>(
    competitions: &'a [Competition],
    event_id: &str,
) -> Option<&'a Competition> {
    competitions
        .iter()
        .find(|c| c.event_id == event_id && c.is_active)
}
