use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::validation::ValidationError;

/// Estimated health condition of an animal, picked at the last report step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    #[default]
    Healthy,
    Sick,
    Recovering,
    Chronic,
}

static ALL_CONDITIONS: &[Condition] = &[
    Condition::Healthy,
    Condition::Sick,
    Condition::Recovering,
    Condition::Chronic,
];

impl Condition {
    /// Returns the wire representation of this condition.
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Healthy => "healthy",
            Condition::Sick => "sick",
            Condition::Recovering => "recovering",
            Condition::Chronic => "chronic",
        }
    }

    /// Returns the label shown next to the radio option.
    pub fn label(&self) -> &'static str {
        match self {
            Condition::Healthy => "Healthy",
            Condition::Sick => "Sick",
            Condition::Recovering => "Recovering",
            Condition::Chronic => "Chronic condition",
        }
    }

    /// Returns all conditions in display order.
    pub fn all() -> &'static [Condition] {
        ALL_CONDITIONS
    }

    /// Returns the next condition in display order, wrapping around.
    pub fn next(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|c| *c == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    /// Returns the previous condition in display order, wrapping around.
    pub fn prev(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|c| *c == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }
}

impl FromStr for Condition {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidCondition(s.to_string()))
    }
}

#[mutants::skip]
impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
