//! Navigation handoff to the routing layer.

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::warn;

use crate::config::{BID_ROUTE, CREATE_ROUTE};
use crate::marketplace::Listing;

/// Intent handed to the router. The listing payload is passed through as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum NavigationIntent {
    /// Open the bid/detail view for a listing.
    Bid { auction: Listing },
    /// Open the auction creation view.
    CreateListing,
}

impl NavigationIntent {
    /// Route the intent targets.
    pub const fn route(&self) -> &'static str {
        match self {
            Self::Bid { .. } => BID_ROUTE,
            Self::CreateListing => CREATE_ROUTE,
        }
    }
}

/// Receiver of navigation intents.
pub trait Navigator: Send + Sync {
    fn navigate(&self, intent: NavigationIntent);
}

/// Navigator forwarding intents over an unbounded channel to the host.
#[derive(Debug, Clone)]
pub struct ChannelNavigator {
    tx: mpsc::UnboundedSender<NavigationIntent>,
}

impl ChannelNavigator {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<NavigationIntent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Navigator for ChannelNavigator {
    fn navigate(&self, intent: NavigationIntent) {
        let route = intent.route();
        if self.tx.send(intent).is_err() {
            warn!("Navigation to {} dropped: router is gone", route);
        }
    }
}
