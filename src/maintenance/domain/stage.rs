//! Request lifecycle stages.

use super::ParseStageError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle stage of a maintenance request.
///
/// The declaration order is the Kanban column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Stage {
    /// Freshly reported, nobody is working on it yet.
    New,
    /// A technician is working on it.
    InProgress,
    /// The repair is done.
    Repaired,
    /// The equipment is written off.
    Scrap,
}

impl Stage {
    /// All stages in column order.
    pub const ALL: [Self; 4] = [Self::New, Self::InProgress, Self::Repaired, Self::Scrap];

    /// Returns the wire representation used by the backend.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::InProgress => "In Progress",
            Self::Repaired => "Repaired",
            Self::Scrap => "Scrap",
        }
    }

    /// Returns `true` for stages the scheduling view treats as finished.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Repaired | Self::Scrap)
    }

    /// Returns `true` when the lifecycle allows moving to `target`.
    ///
    /// Requests advance `New → InProgress → Repaired` and may be scrapped
    /// from any non-terminal stage.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::New, Self::InProgress)
                | (Self::InProgress, Self::Repaired)
                | (Self::New | Self::InProgress, Self::Scrap)
        )
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Stage> for &'static str {
    fn from(value: Stage) -> Self {
        value.as_str()
    }
}

impl TryFrom<&str> for Stage {
    type Error = ParseStageError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|ch| !matches!(ch, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "new" => Ok(Self::New),
            "inprogress" => Ok(Self::InProgress),
            "repaired" => Ok(Self::Repaired),
            "scrap" => Ok(Self::Scrap),
            _ => Err(ParseStageError(value.to_owned())),
        }
    }
}

impl TryFrom<String> for Stage {
    type Error = ParseStageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}
