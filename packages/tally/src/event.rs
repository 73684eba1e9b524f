use chrono::NaiveDate;
use common::Listable;
use serde::{Deserialize, Serialize};

use crate::error::TallyError;
use crate::shared::validate_min_len;
use crate::user::User;

/// A pageant, contest night or festival that groups competitions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    #[schema(example = "Foundation Week 2026")]
    pub name: String,
    pub event_date: NaiveDate,
    pub is_active: bool,
}

impl Listable for Event {
    fn sort_key(&self) -> &str {
        &self.name
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    pub name: String,
    pub event_date: NaiveDate,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl EventRequest {
    pub fn into_event(self, id: impl Into<String>) -> Event {
        Event {
            id: id.into(),
            name: self.name.trim().to_string(),
            event_date: self.event_date,
            is_active: self.is_active,
        }
    }
}

pub fn validate_event(req: &EventRequest) -> Result<(), TallyError> {
    validate_min_len(&req.name, 3, "Event name")
}

/// Reject an event whose name is already taken (case-insensitive).
pub fn find_conflict(
    existing: &[Event],
    req: &EventRequest,
    exclude_id: Option<&str>,
) -> Result<(), TallyError> {
    let name = req.name.trim().to_lowercase();
    if existing
        .iter()
        .any(|e| Some(e.id.as_str()) != exclude_id && e.name.to_lowercase() == name)
    {
        return Err(TallyError::Conflict("Event already exists".into()));
    }
    Ok(())
}

/// An event can only be deleted once no user belongs to it.
pub fn ensure_deletable(event_id: &str, users: &[User]) -> Result<(), TallyError> {
    let attached = users
        .iter()
        .filter(|u| u.event_id.as_deref() == Some(event_id))
        .count();
    if attached > 0 {
        tracing::debug!(event_id, attached, "Refused to delete event with users");
        return Err(TallyError::Conflict(
            "Event has users associated with it. Please delete users first.".into(),
        ));
    }
    Ok(())
}
