use serde::{Deserialize, Serialize};

use crate::config::{BUYER_ROLE, ROLE_FIELD};
use crate::traits::Document;

/// Role classifier of the current viewer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "role", rename_all = "snake_case")]
pub enum ViewerRole {
    /// No identity, no profile, no role field, or the lookup failed.
    #[default]
    Unknown,
    /// Role string stored on the viewer's profile.
    Known(String),
}

/// Whether the "create listing" action is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreateAffordance {
    Shown,
    Hidden,
}

impl CreateAffordance {
    pub const fn is_shown(self) -> bool {
        matches!(self, Self::Shown)
    }
}

impl ViewerRole {
    /// Extract the role from a profile document. Empty or non-string roles
    /// are treated as absent.
    pub fn from_profile(profile: &Document) -> Self {
        match profile.get_str(ROLE_FIELD) {
            Some(role) if !role.is_empty() => Self::Known(role.to_string()),
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Unknown => None,
            Self::Known(role) => Some(role),
        }
    }

    /// Creation gating policy.
    ///
    /// `Unknown` is permissive: the action is shown whenever the role could
    /// not be established. This is a product decision, kept deliberately.
    /// A known role hides the action only for buyers.
    pub fn create_affordance(&self) -> CreateAffordance {
        match self {
            Self::Unknown => CreateAffordance::Shown,
            Self::Known(role) if role == BUYER_ROLE => CreateAffordance::Hidden,
            Self::Known(_) => CreateAffordance::Shown,
        }
    }
}
