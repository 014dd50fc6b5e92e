//! Maintenance teams.

use super::{CatalogDomainError, required};
use crate::ids::{TeamId, UserId};

/// Group of technicians responsible for a category of equipment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    /// Team identifier.
    pub id: TeamId,
    /// Display name.
    pub name: String,
    /// Equipment category the team looks after.
    pub category_name: String,
    /// Member technicians, in assignment order.
    pub members: Vec<TeamMember>,
}

/// A technician on a team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMember {
    /// User identifier.
    pub id: UserId,
    /// Display name, when the backend joined it in.
    pub name: Option<String>,
}

impl TeamMember {
    /// Creates a member known only by identifier.
    #[must_use]
    pub const fn new(id: UserId) -> Self {
        Self { id, name: None }
    }

    /// Attaches a display name; blank names are ignored.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let raw = name.into();
        let trimmed = raw.trim();
        self.name = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        self
    }
}

impl Team {
    /// Returns `true` when the team looks after `category`.
    ///
    /// Matching ignores case and surrounding whitespace.
    #[must_use]
    pub fn handles_category(&self, category: &str) -> bool {
        self.category_name
            .trim()
            .eq_ignore_ascii_case(category.trim())
    }

    /// Returns `true` when `user` belongs to the team.
    #[must_use]
    pub fn has_member(&self, user: &UserId) -> bool {
        self.members.iter().any(|member| &member.id == user)
    }

    /// Adds `member` unless the team already has them.
    ///
    /// A repeated member gains a display name if it had none.
    pub fn add_member(&mut self, member: TeamMember) {
        match self
            .members
            .iter_mut()
            .find(|existing| existing.id == member.id)
        {
            Some(existing) => {
                if existing.name.is_none() {
                    existing.name = member.name;
                }
            }
            None => self.members.push(member),
        }
    }

    /// Iterates member identifiers.
    pub fn member_ids(&self) -> impl Iterator<Item = &UserId> {
        self.members.iter().map(|member| &member.id)
    }
}

/// Validated team form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamDraft {
    /// Display name.
    pub name: String,
    /// Equipment category the team looks after.
    pub category_name: String,
    /// Initial members.
    pub technician_ids: Vec<UserId>,
}

impl TeamDraft {
    /// Creates a draft without members.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogDomainError::MissingField`] when the name or category
    /// is blank.
    pub fn new(
        name: impl Into<String>,
        category_name: impl Into<String>,
    ) -> Result<Self, CatalogDomainError> {
        Ok(Self {
            name: required("team name", name)?,
            category_name: required("category", category_name)?,
            technician_ids: Vec::new(),
        })
    }

    /// Sets the initial members, dropping duplicates.
    #[must_use]
    pub fn with_technicians(mut self, technicians: impl IntoIterator<Item = UserId>) -> Self {
        for technician in technicians {
            if !self.technician_ids.contains(&technician) {
                self.technician_ids.push(technician);
            }
        }
        self
    }
}
