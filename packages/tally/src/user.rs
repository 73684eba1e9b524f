use common::{Listable, Role, UserTab};
use serde::{Deserialize, Serialize};

use crate::actor::Actor;
use crate::error::TallyError;
use crate::shared::{validate_min_len, validate_title};

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 8;

/// An account. Credentials live with the session layer and never appear here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[schema(example = "judge1")]
    pub username: String,
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub photo: Option<String>,
    /// Seat number on the judges' panel. 0 for everyone who is not a judge.
    #[serde(default)]
    pub judge_number: u32,
    #[serde(default)]
    pub event_id: Option<String>,
    /// Competitions a tabulator or judge is assigned to.
    #[serde(default)]
    pub competition_ids: Vec<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Listable for User {
    fn sort_key(&self) -> &str {
        &self.username
    }

    fn matches(&self, needle: &str) -> bool {
        self.username.to_lowercase().contains(needle)
            || self.full_name.to_lowercase().contains(needle)
    }
}

/// Request body for creating or updating a user.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    pub username: String,
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    pub role: Role,
    /// Required on create, ignored on update.
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub judge_number: u32,
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub competition_ids: Vec<String>,
}

impl UserRequest {
    /// Build the stored record. The password is handed to the session layer
    /// separately and dropped here.
    pub fn into_user(self, id: impl Into<String>) -> User {
        let req = normalize_user(self);
        User {
            id: id.into(),
            username: req.username,
            full_name: req.full_name,
            email: req.email,
            role: req.role,
            photo: req.photo,
            judge_number: req.judge_number,
            event_id: req.event_id,
            competition_ids: req.competition_ids,
            is_active: true,
        }
    }
}

/// Lowercase and trim the username, trim the other text fields, and clear the
/// judge number of anyone who is not a judge.
pub fn normalize_user(mut req: UserRequest) -> UserRequest {
    req.username = req.username.trim().to_lowercase();
    req.full_name = req.full_name.trim().to_string();
    req.email = req.email.trim().to_string();
    if req.role != Role::Judge {
        req.judge_number = 0;
    }
    req
}

/// Rules shared by create and update.
pub fn validate_user(req: &UserRequest) -> Result<(), TallyError> {
    validate_min_len(&req.username, MIN_USERNAME_LEN, "Username")?;
    validate_title(&req.full_name, "Full name")?;
    if req.role != Role::Admin && req.event_id.as_deref().is_none_or(|e| e.trim().is_empty()) {
        return Err(TallyError::validation("Event ID is required"));
    }
    Ok(())
}

pub fn validate_new_user(req: &UserRequest) -> Result<(), TallyError> {
    validate_user(req)?;
    validate_password_reset(req.password.as_deref().unwrap_or_default())
}

pub fn validate_password_reset(password: &str) -> Result<(), TallyError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(TallyError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

/// Reject a username already in use, or a judge seat already taken in the
/// same event. Expects a normalized request.
pub fn find_conflict(
    existing: &[User],
    req: &UserRequest,
    exclude_id: Option<&str>,
) -> Result<(), TallyError> {
    let clash = existing.iter().any(|u| {
        if Some(u.id.as_str()) == exclude_id {
            return false;
        }
        let same_seat = req.role == Role::Judge
            && u.role == Role::Judge
            && req.judge_number != 0
            && u.judge_number == req.judge_number
            && u.event_id == req.event_id;
        u.username == req.username || same_seat
    });
    if clash {
        return Err(TallyError::Conflict(
            "User number/username already exists".into(),
        ));
    }
    Ok(())
}

/// Check that `actor` may create, update, toggle, reset or delete an account
/// with `target_role`. Admin and manager accounts need `manager:manage`,
/// which only admins hold.
pub fn authorize_user_change(actor: &Actor, target_role: Role) -> Result<(), TallyError> {
    if target_role.is_privileged() {
        actor.require_permission("manager:manage")
    } else {
        actor.require_permission("user:manage")
    }
}

/// Users `actor` is allowed to see on the users page.
pub fn visible_users<'a>(actor: &Actor, users: &'a [User]) -> Vec<&'a User> {
    users
        .iter()
        .filter(|u| match actor.role {
            Role::Admin => true,
            _ => u.event_id.is_some() && u.event_id == actor.event_id,
        })
        .collect()
}

/// Split users into the managers tab and the judges tab (judges and tabulators).
/// Admin accounts appear in neither.
pub fn split_user_tabs<'a, I>(users: I) -> (Vec<&'a User>, Vec<&'a User>)
where
    I: IntoIterator<Item = &'a User>,
{
    let mut managers = Vec::new();
    let mut judges = Vec::new();
    for user in users {
        match user.role {
            Role::Manager => managers.push(user),
            Role::Judge | Role::Tabulator => judges.push(user),
            Role::Admin => {}
        }
    }
    (managers, judges)
}

/// Users shown under `tab` for `actor`, in stored order.
pub fn users_for_tab(actor: &Actor, users: &[User], tab: UserTab) -> Vec<User> {
    let (managers, judges) = split_user_tabs(visible_users(actor, users));
    let selected = match tab {
        UserTab::Managers => managers,
        UserTab::Judges => judges,
    };
    selected.into_iter().cloned().collect()
}
