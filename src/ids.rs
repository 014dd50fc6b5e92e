//! Identifier types shared by every bounded context.
//!
//! The backend hands out opaque string identifiers. Each kind of record gets
//! its own newtype so a team identifier can never be passed where a user
//! identifier is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Error returned when an identifier is blank after trimming.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("{0} identifier must not be empty")]
pub struct EmptyIdentifierError(pub &'static str);

macro_rules! string_identifier {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a validated identifier.
            ///
            /// # Errors
            ///
            /// Returns [`EmptyIdentifierError`] when the value is blank.
            pub fn new(value: impl Into<String>) -> Result<Self, EmptyIdentifierError> {
                let raw = value.into();
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(EmptyIdentifierError($label));
                }
                Ok(Self(trimmed.to_owned()))
            }

            /// Creates a fresh random identifier.
            #[must_use]
            pub fn generate() -> Self {
                Self(Uuid::new_v4().simple().to_string())
            }

            /// Returns the identifier as `str`.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = EmptyIdentifierError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_identifier!(
    /// Identifier of a maintenance request.
    RequestId,
    "request"
);
string_identifier!(
    /// Identifier of a user account (employee or technician).
    UserId,
    "user"
);
string_identifier!(
    /// Identifier of a maintenance team.
    TeamId,
    "team"
);
string_identifier!(
    /// Identifier of a piece of equipment.
    EquipmentId,
    "equipment"
);
string_identifier!(
    /// Identifier of a work center.
    WorkCenterId,
    "work center"
);
