use common::Role;

use crate::error::TallyError;

/// The signed-in user performing an operation.
///
/// Built by the session layer; the core only reads it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    pub user_id: String,
    pub role: Role,
    /// Event the account belongs to. Admins usually have none.
    pub event_id: Option<String>,
}

impl Actor {
    pub fn new(user_id: impl Into<String>, role: Role, event_id: Option<&str>) -> Self {
        Self {
            user_id: user_id.into(),
            role,
            event_id: event_id.map(str::to_string),
        }
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.role.has_permission(permission)
    }

    /// Returns `Ok(())` if the actor has the given permission, `Err(PermissionDenied)` otherwise.
    pub fn require_permission(&self, permission: &str) -> Result<(), TallyError> {
        if self.has_permission(permission) {
            Ok(())
        } else {
            tracing::warn!(
                user_id = %self.user_id,
                role = %self.role,
                permission,
                "Permission denied"
            );
            Err(TallyError::PermissionDenied)
        }
    }

    /// Whether the actor may see records of `event_id`.
    /// Admins see every event; everyone else only their own.
    pub fn can_access_event(&self, event_id: &str) -> bool {
        self.role == Role::Admin || self.event_id.as_deref() == Some(event_id)
    }
}
