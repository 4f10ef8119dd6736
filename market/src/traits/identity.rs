//! Signed-in identity abstraction.

use serde::{Deserialize, Serialize};

/// An already-authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Key of the identity's profile document.
    pub uid: String,
    pub email: Option<String>,
}

impl Identity {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: None,
        }
    }
}

/// Source of the currently signed-in identity.
pub trait IdentityProvider: Send + Sync {
    /// Returns the signed-in identity, or `None` when nobody is signed in.
    fn current_identity(&self) -> Option<Identity>;
}

/// Identity fixed at startup (from configuration or flags).
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    identity: Option<Identity>,
}

impl StaticIdentity {
    pub const fn new(identity: Option<Identity>) -> Self {
        Self { identity }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_identity(&self) -> Option<Identity> {
        self.identity.clone()
    }
}
