use serde::{Deserialize, Serialize};

use crate::snapshot::{SavedActiveTab, SavedEditorTab};
use crate::state::{Chapter, ExternalLibrary, Variant};

/// Decides whether a stored playground value counts as present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresencePolicy {
    /// Any stored value is present, including `false` and `0`.
    #[default]
    Explicit,
    /// Legacy behavior: falsy stored values (`false`, `0`) fall back to the
    /// default. Lists, the wrapped tab index and enum values are always truthy;
    /// an empty enum string never decodes, so it falls back on its own.
    Truthy,
}

impl PresencePolicy {
    /// Keep `stored` only if it counts as present under this policy.
    pub fn admit<T: Truthy>(self, stored: Option<T>) -> Option<T> {
        match self {
            PresencePolicy::Explicit => stored,
            PresencePolicy::Truthy => stored.filter(Truthy::is_truthy),
        }
    }
}

/// Truthiness of a stored value under the legacy presence rules.
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

impl Truthy for Chapter {
    fn is_truthy(&self) -> bool {
        self.0 != 0
    }
}

// Enum values are stored as non-empty strings.
impl Truthy for Variant {
    fn is_truthy(&self) -> bool {
        true
    }
}

impl Truthy for ExternalLibrary {
    fn is_truthy(&self) -> bool {
        true
    }
}

impl Truthy for SavedActiveTab {
    fn is_truthy(&self) -> bool {
        true
    }
}

impl Truthy for Vec<SavedEditorTab> {
    fn is_truthy(&self) -> bool {
        true
    }
}
