use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::validation::ValidationError;

/// Staff role chosen at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Admin,
    Caretaker,
}

impl Role {
    /// Returns the wire representation of this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Caretaker => "caretaker",
        }
    }

    /// Returns the other role. There are only two.
    pub fn toggle(self) -> Self {
        match self {
            Role::Admin => Role::Caretaker,
            Role::Caretaker => Role::Admin,
        }
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "caretaker" => Ok(Role::Caretaker),
            other => Err(ValidationError::InvalidRole(other.to_string())),
        }
    }
}

#[mutants::skip]
impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
