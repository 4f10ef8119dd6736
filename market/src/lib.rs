pub mod config;
pub mod error;
pub mod marketplace;
pub mod page;
pub mod store;
pub mod task;
pub mod traits;

#[cfg(any(test, feature = "test-support"))]
pub mod mocks;

pub use config::*;
pub use error::{MarketError, MarketResult};
pub use marketplace::{
    filter_listings, highlight, AuctionCard, CreateAffordance, Listing, MatchFragment,
    SearchQuery, ViewerRole,
};
pub use page::{AuctionPage, BrowseView, MountHandle, PageView};
pub use store::{JsonFileStore, ListingOperations, RoleResolver};
pub use task::{MountScope, TaskOutcome};
pub use traits::{
    ChannelNavigator, Document, DocumentStore, Identity, IdentityProvider, NavigationIntent,
    Navigator, StaticIdentity, SystemTimeProvider, TimeProvider,
};
