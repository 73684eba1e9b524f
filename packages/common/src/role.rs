#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role. Every user holds exactly one.
///
/// When the `sea-orm` feature is enabled, this enum can be used directly in SeaORM entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Manages events and event managers across the whole installation.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "admin"))]
    Admin,
    /// Runs a single event: competitions, candidates, judges and tabulators.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "manager"))]
    Manager,
    /// Scores candidates in the competitions assigned to them.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "judge"))]
    Judge,
    /// Reads results for their event.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "tabulator"))]
    Tabulator,
}

/// Role-permission mappings. Permissions are `resource:action` strings.
pub const DEFAULT_MAPPINGS: &[(Role, &str)] = &[
    // Admin
    (Role::Admin, "event:manage"),
    (Role::Admin, "competition:manage"),
    (Role::Admin, "candidate:manage"),
    (Role::Admin, "user:manage"),
    (Role::Admin, "manager:manage"),
    (Role::Admin, "results:view"),
    // Manager
    (Role::Manager, "competition:view"),
    (Role::Manager, "competition:manage"),
    (Role::Manager, "candidate:manage"),
    (Role::Manager, "user:manage"),
    (Role::Manager, "results:view"),
    // Judge
    (Role::Judge, "competition:view"),
    (Role::Judge, "scoresheet:submit"),
    // Tabulator
    (Role::Tabulator, "competition:view"),
    (Role::Tabulator, "results:view"),
];

/// Navigation sections shown in the sidebar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Menu {
    Home,
    Competitions,
    Results,
    Settings,
    Events,
    Users,
}

const MENU_VISIBILITY: &[(Role, &[Menu])] = &[
    (
        Role::Admin,
        &[Menu::Home, Menu::Results, Menu::Settings, Menu::Events, Menu::Users],
    ),
    (
        Role::Manager,
        &[Menu::Home, Menu::Competitions, Menu::Results, Menu::Settings, Menu::Users],
    ),
    (
        Role::Judge,
        &[Menu::Competitions, Menu::Results, Menu::Settings, Menu::Users],
    ),
    (
        Role::Tabulator,
        &[Menu::Home, Menu::Competitions, Menu::Results, Menu::Settings, Menu::Users],
    ),
];

/// Where a freshly authenticated user is sent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "to", content = "competition_id", rename_all = "snake_case")]
pub enum Landing {
    Home,
    /// Scoring view of the active competition.
    Competition(String),
    /// Judges wait here until a competition is activated.
    Waiting,
}

impl Role {
    /// All roles.
    pub const ALL: &'static [Role] = &[Self::Admin, Self::Manager, Self::Judge, Self::Tabulator];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Judge => "judge",
            Self::Tabulator => "tabulator",
        }
    }

    /// Permissions granted to this role, in table order.
    pub fn permissions(&self) -> Vec<&'static str> {
        DEFAULT_MAPPINGS
            .iter()
            .filter(|(role, _)| role == self)
            .map(|&(_, permission)| permission)
            .collect()
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        DEFAULT_MAPPINGS
            .iter()
            .any(|(role, p)| role == self && *p == permission)
    }

    /// Whether the sidebar shows `menu` to this role.
    pub fn can_see(&self, menu: Menu) -> bool {
        MENU_VISIBILITY
            .iter()
            .find(|(role, _)| role == self)
            .is_some_and(|(_, menus)| menus.contains(&menu))
    }

    /// Roles whose accounts can only be changed by an admin.
    pub fn is_privileged(&self) -> bool {
        matches!(self, Self::Admin | Self::Manager)
    }
}

/// Decide the landing page after sign-in.
///
/// Judges go straight to the active competition, or to the waiting page
/// when none is active. Every other role starts at home.
pub fn landing_for(role: Role, active_competition_id: Option<&str>) -> Landing {
    match role {
        Role::Judge => match active_competition_id {
            Some(id) if !id.trim().is_empty() => Landing::Competition(id.to_string()),
            _ => Landing::Waiting,
        },
        _ => Landing::Home,
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing an invalid role string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoleError {
    invalid: String,
}

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid role '{}'. Valid values: {}",
            self.invalid,
            Role::ALL
                .iter()
                .map(|r| r.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for ParseRoleError {}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "judge" => Ok(Self::Judge),
            "tabulator" => Ok(Self::Tabulator),
            _ => Err(ParseRoleError {
                invalid: s.to_string(),
            }),
        }
    }
}
