use common::Listable;
use serde::{Deserialize, Serialize};

use crate::error::TallyError;
use crate::shared::{require_id, validate_number, validate_title};

/// A contestant in an event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: String,
    pub event_id: String,
    #[schema(example = 7)]
    pub number: u32,
    #[schema(example = "Maria Santos")]
    pub full_name: String,
    #[serde(default)]
    pub course: String,
    /// Photo URL. Upload is handled elsewhere.
    #[serde(default)]
    pub photo: Option<String>,
}

impl Listable for Candidate {
    fn sort_key(&self) -> &str {
        &self.full_name
    }
}

impl Candidate {
    /// Number as printed on the candidate card, zero-padded to two digits.
    pub fn display_number(&self) -> String {
        format!("{:02}", self.number)
    }
}

/// Request body for creating or updating a candidate.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRequest {
    pub event_id: String,
    pub number: u32,
    pub full_name: String,
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub photo: Option<String>,
}

impl CandidateRequest {
    pub fn into_candidate(self, id: impl Into<String>) -> Candidate {
        Candidate {
            id: id.into(),
            event_id: self.event_id,
            number: self.number,
            full_name: self.full_name.trim().to_string(),
            course: self.course.trim().to_string(),
            photo: self.photo.filter(|p| !p.trim().is_empty()),
        }
    }
}

pub fn validate_candidate(req: &CandidateRequest) -> Result<(), TallyError> {
    require_id(&req.event_id, "Event")?;
    validate_title(&req.full_name, "Full name")?;
    validate_number(req.number, "Candidate")?;
    Ok(())
}

/// Reject a candidate whose full name or number is already used in its event.
pub fn find_conflict(
    existing: &[Candidate],
    req: &CandidateRequest,
    exclude_id: Option<&str>,
) -> Result<(), TallyError> {
    let full_name = req.full_name.trim();
    let clash = existing.iter().any(|c| {
        c.event_id == req.event_id
            && Some(c.id.as_str()) != exclude_id
            && (c.full_name == full_name || c.number == req.number)
    });
    if clash {
        return Err(TallyError::Conflict(
            "Candidate name/number already exists".into(),
        ));
    }
    Ok(())
}
