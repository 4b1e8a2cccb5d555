//! What a search is trying to reach.

use serde::{Deserialize, Serialize};

use crate::canonical::is_nice_representative;
use crate::configuration::{Configuration, Vertex};

/// What a puzzle asks the player to reach.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "type")]
pub enum Goal {
    /// Exactly this configuration.
    Exact {
        /// The target.
        target: Configuration,
    },
    /// Every vertex at `0`.
    AllZeros,
    /// Any nice representative with respect to `distinguished`.
    NiceRepresentative {
        /// The vertex allowed to hold 0 or 3 chips.
        distinguished: Vertex,
    },
}

impl Goal {
    /// Shorthand for [`Goal::Exact`].
    pub fn exact(target: Configuration) -> Self {
        Self::Exact { target }
    }

    /// Whether `configuration` satisfies this goal.
    pub fn is_met(&self, configuration: &Configuration) -> bool {
        match self {
            Self::Exact { target } => configuration == target,
            Self::AllZeros => configuration.is_zero(),
            Self::NiceRepresentative { distinguished } => is_nice_representative(configuration, *distinguished),
        }
    }

    /// The single configuration this goal accepts, if there is only one.
    pub fn target(&self) -> Option<Configuration> {
        match self {
            Self::Exact { target } => Some(*target),
            Self::AllZeros => Some(Configuration::ZERO),
            Self::NiceRepresentative { .. } => None,
        }
    }
}

impl From<Configuration> for Goal {
    fn from(value: Configuration) -> Self {
        Self::Exact { target: value }
    }
}
