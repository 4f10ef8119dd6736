use tracing::{debug, error, warn};

use crate::config::USERS_COLLECTION;
use crate::marketplace::ViewerRole;
use crate::traits::{DocumentStore, IdentityProvider};

/// Resolves the signed-in viewer's role from their profile document.
#[derive(Clone)]
pub struct RoleResolver<S: DocumentStore, I: IdentityProvider> {
    store: S,
    identity: I,
}

impl<S: DocumentStore, I: IdentityProvider> RoleResolver<S, I> {
    pub const fn new(store: S, identity: I) -> Self {
        Self { store, identity }
    }

    /// Look up the viewer role.
    ///
    /// Never fails: a missing identity, a missing profile or an unreachable
    /// store are logged and resolve to [`ViewerRole::Unknown`].
    pub async fn resolve_role(&self) -> ViewerRole {
        let Some(identity) = self.identity.current_identity() else {
            warn!("No user is currently logged in");
            return ViewerRole::Unknown;
        };

        match self.store.get_by_id(USERS_COLLECTION, &identity.uid).await {
            Ok(Some(profile)) => {
                let role = ViewerRole::from_profile(&profile);
                debug!("Resolved role {:?} for user {}", role, identity.uid);
                role
            }
            Ok(None) => {
                warn!("No user data found for {}", identity.uid);
                ViewerRole::Unknown
            }
            Err(e) => {
                error!("Error fetching user role: {:#}", e);
                ViewerRole::Unknown
            }
        }
    }
}
