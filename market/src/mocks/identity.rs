//! Mock identity source whose signed-in user can change mid-test.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::traits::{Identity, IdentityProvider};

#[derive(Debug, Clone, Default)]
pub struct MockIdentity {
    current: Arc<RwLock<Option<Identity>>>,
}

impl MockIdentity {
    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn signed_in(uid: &str) -> Self {
        let identity = Self::default();
        identity.sign_in(uid);
        identity
    }

    pub fn sign_in(&self, uid: &str) {
        *self.current.write() = Some(Identity::new(uid));
    }

    pub fn sign_out(&self) {
        *self.current.write() = None;
    }
}

impl IdentityProvider for MockIdentity {
    fn current_identity(&self) -> Option<Identity> {
        self.current.read().clone()
    }
}
