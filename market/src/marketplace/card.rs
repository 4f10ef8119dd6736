use serde::Serialize;

use crate::config::CURRENCY_SYMBOL;
use crate::marketplace::search::{highlight, MatchFragment, SearchQuery};
use crate::marketplace::timestamp::format_card_date;
use crate::marketplace::Listing;

/// Display info for one listing in the auction grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AuctionCard {
    pub listing_id: String,
    pub badge: String,
    pub item_name: String,
    pub price: String,
    pub unit: String,
    pub quantity: String,
    pub location: Vec<MatchFragment>,
    pub ends: String,
    pub image_url: String,
    pub image_alt: String,
}

impl AuctionCard {
    pub fn new(listing: &Listing, query: &SearchQuery) -> Self {
        Self {
            listing_id: listing.id.clone(),
            badge: format!("#{}", listing.auction_id),
            item_name: listing.item_name.clone(),
            price: format!("{CURRENCY_SYMBOL}{}", listing.price_per_unit),
            unit: format!("/{}", listing.unit_label()),
            quantity: format!("Qty: {}", listing.quantity),
            location: highlight(&listing.location, query),
            ends: format!("Ends: {}", format_card_date(&listing.auction_end_date)),
            image_url: listing.image_url.clone(),
            image_alt: format!("Image of {}", listing.item_name),
        }
    }
}
