pub mod card;
pub mod listing;
pub mod role;
pub mod search;
pub mod timestamp;

pub use card::AuctionCard;
pub use listing::Listing;
pub use role::{CreateAffordance, ViewerRole};
pub use search::{filter_listings, highlight, MatchFragment, SearchQuery};
pub use timestamp::parse_timestamp;
