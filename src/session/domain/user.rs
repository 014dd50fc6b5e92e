//! Session user and role types.

use super::ParseRoleError;
use crate::ids::{TeamId, UserId};
use crate::maintenance::domain::PersonRef;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Employee filing requests.
    #[default]
    User,
    /// Technician working on requests.
    Technician,
}

impl Role {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Technician => "technician",
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "user" | "employee" => Ok(Self::User),
            "technician" => Ok(Self::Technician),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user a session is running as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    id: UserId,
    name: String,
    role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    team_id: Option<TeamId>,
}

impl SessionUser {
    /// Creates a session user without a team.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            role,
            team_id: None,
        }
    }

    /// Sets the team.
    #[must_use]
    pub fn with_team(mut self, team_id: TeamId) -> Self {
        self.team_id = Some(team_id);
        self
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the team, if any.
    #[must_use]
    pub const fn team_id(&self) -> Option<&TeamId> {
        self.team_id.as_ref()
    }

    /// Returns `true` for technicians.
    #[must_use]
    pub const fn is_technician(&self) -> bool {
        matches!(self.role, Role::Technician)
    }

    /// Returns the user as a request person reference.
    #[must_use]
    pub fn as_person(&self) -> PersonRef {
        PersonRef::new(self.id.clone(), self.name.clone())
    }
}
