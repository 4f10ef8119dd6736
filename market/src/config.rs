//! Configuration constants for the auction browser.
//!
//! Collection names, display fallbacks and environment variable names live
//! here so the store adapters, the page controller and both binaries agree.

use std::path::PathBuf;

use crate::error::{MarketError, MarketResult};
use crate::traits::Identity;

/// Collection holding auction listing documents.
pub const AUCTIONS_COLLECTION: &str = "auctions";

/// Collection holding user profile documents, keyed by identity uid.
pub const USERS_COLLECTION: &str = "users";

/// Profile field carrying the viewer role.
pub const ROLE_FIELD: &str = "role";

/// Role that is not allowed to create auctions.
pub const BUYER_ROLE: &str = "buyer";

/// Unit label shown when a listing has none.
pub const DEFAULT_UNIT: &str = "QT";

/// Currency symbol prefixed to prices on cards.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Message shown when the filtered grid is empty.
pub const EMPTY_GRID_MESSAGE: &str = "No active auctions available.";

/// Placeholder text of the search box.
pub const SEARCH_PLACEHOLDER: &str = "Search by location or item name";

/// Route of the bid/detail view.
pub const BID_ROUTE: &str = "/bid";

/// Route of the auction creation view.
pub const CREATE_ROUTE: &str = "/add";

/// Environment variable overriding the JSON store path.
pub const STORE_PATH_ENV: &str = "AGRILINK_STORE_PATH";

/// Environment variable carrying the signed-in identity uid.
pub const UID_ENV: &str = "AGRILINK_UID";

/// Environment variable carrying the signed-in identity email.
pub const EMAIL_ENV: &str = "AGRILINK_EMAIL";

/// Data directory name under the platform's local data dir.
pub const DATA_DIR_NAME: &str = "agrilink";

/// Store file name inside the data directory.
pub const STORE_FILE_NAME: &str = "store.json";

/// Runtime configuration shared by the GUI and headless binaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketConfig {
    /// Path of the JSON document store.
    pub store_path: PathBuf,
    /// Identity assumed to be signed in, if any.
    pub identity: Option<Identity>,
}

impl MarketConfig {
    /// Build a configuration from the process environment.
    pub fn from_env() -> MarketResult<Self> {
        let store_path = match std::env::var(STORE_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            Ok(_) => {
                return Err(MarketError::Config(format!("{STORE_PATH_ENV} is set but empty")));
            }
            Err(_) => default_store_path(),
        };

        let identity = std::env::var(UID_ENV)
            .ok()
            .filter(|uid| !uid.trim().is_empty())
            .map(|uid| Identity {
                uid,
                email: std::env::var(EMAIL_ENV).ok(),
            });

        Ok(Self {
            store_path,
            identity,
        })
    }

    /// Replace the identity (e.g. from a command-line flag).
    #[must_use]
    pub fn with_identity(mut self, identity: Option<Identity>) -> Self {
        self.identity = identity;
        self
    }

    /// Replace the store path.
    #[must_use]
    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = path.into();
        self
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            identity: None,
        }
    }
}

/// Default store location: `<local data dir>/agrilink/store.json`.
pub fn default_store_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR_NAME)
        .join(STORE_FILE_NAME)
}
