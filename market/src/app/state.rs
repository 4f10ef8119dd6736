//! Application state management.
//!
//! Provides a single `SharedAppState` struct that bundles the auction page
//! and the current route, handed from `main` to the Dioxus UI via a
//! `OnceLock`.

use std::sync::Arc;

use market::{
    AuctionPage, JsonFileStore, NavigationIntent, Navigator, StaticIdentity, SystemTimeProvider,
};
use parking_lot::RwLock;
use tracing::info;

/// Navigator that records the latest intent for the UI to render.
#[derive(Clone, Default)]
pub struct RouteNavigator {
    current: Arc<RwLock<Option<NavigationIntent>>>,
}

impl RouteNavigator {
    pub fn current(&self) -> Option<NavigationIntent> {
        self.current.read().clone()
    }

    /// Return to the auction grid.
    pub fn back(&self) {
        *self.current.write() = None;
    }
}

impl Navigator for RouteNavigator {
    fn navigate(&self, intent: NavigationIntent) {
        info!("Navigating to {}", intent.route());
        *self.current.write() = Some(intent);
    }
}

pub type GuiPage = AuctionPage<JsonFileStore, SystemTimeProvider, StaticIdentity, RouteNavigator>;

/// Bundled application state shared with the Dioxus UI.
#[derive(Clone)]
pub struct SharedAppState {
    pub page: Arc<GuiPage>,
    pub router: RouteNavigator,
}

impl SharedAppState {
    pub fn new(store: JsonFileStore, identity: StaticIdentity) -> Self {
        let router = RouteNavigator::default();
        let page = AuctionPage::new(store, SystemTimeProvider::new(), identity, router.clone());
        Self {
            page: Arc::new(page),
            router,
        }
    }
}

/// Single static for the main -> Dioxus handoff.
pub static SHARED_STATE: std::sync::OnceLock<SharedAppState> = std::sync::OnceLock::new();
