use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

use crate::config::AUCTIONS_COLLECTION;
use crate::error::{MarketError, MarketResult};
use crate::marketplace::Listing;
use crate::traits::{DocumentStore, TimeProvider};

/// Store operations specialized for auction listings.
#[derive(Clone)]
pub struct ListingOperations<S: DocumentStore, T: TimeProvider> {
    store: S,
    time: T,
}

impl<S: DocumentStore, T: TimeProvider> ListingOperations<S, T> {
    pub const fn new(store: S, time: T) -> Self {
        Self { store, time }
    }

    /// Fetch the working set: every listing whose end time has not passed.
    ///
    /// Store failures are logged and degrade to an empty set.
    pub async fn fetch_active_listings(&self) -> Vec<Listing> {
        // One clock read per fetch so every record is judged against the same instant.
        let now = self.time.now();
        match self.load_active_at(now).await {
            Ok(listings) => listings,
            Err(e) => {
                error!("Error fetching auctions: {}", e);
                Vec::new()
            }
        }
    }

    /// Fetch all listings and keep those active at `now`.
    pub async fn load_active_at(&self, now: DateTime<Utc>) -> MarketResult<Vec<Listing>> {
        let listings = self.load_all().await?;
        let total = listings.len();

        let active: Vec<Listing> = listings
            .into_iter()
            .filter(|listing| {
                if listing.end_time().is_none() {
                    debug!(
                        "Excluding listing {} with invalid end date '{}'",
                        listing.id, listing.auction_end_date
                    );
                    return false;
                }
                listing.is_active_at(now)
            })
            .collect();

        info!("Fetched {} auctions, {} active", total, active.len());
        Ok(active)
    }

    /// Fetch and normalize every listing, expired or not.
    pub async fn load_all(&self) -> MarketResult<Vec<Listing>> {
        let docs = self
            .store
            .list_all(AUCTIONS_COLLECTION)
            .await
            .map_err(|e| MarketError::Store(format!("{e:#}")))?;

        Ok(docs.iter().map(Listing::from_document).collect())
    }
}
