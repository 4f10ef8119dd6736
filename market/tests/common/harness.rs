//! Page test harness.
//!
//! Wires an `AuctionPage` to mock collaborators and offers helpers to seed
//! listings relative to the harness clock.

use chrono::Duration;
use market::mocks::{MockIdentity, MockStore, MockTime, RecordingNavigator};
use market::{
    AuctionPage, BrowseView, PageView, TimeProvider, AUCTIONS_COLLECTION, USERS_COLLECTION,
};
use serde_json::{json, Value};

pub type TestPage = AuctionPage<MockStore, MockTime, MockIdentity, RecordingNavigator>;

pub struct PageHarness {
    pub page: TestPage,
    pub store: MockStore,
    pub time: MockTime,
    pub identity: MockIdentity,
    pub navigator: RecordingNavigator,
}

#[allow(dead_code)]
impl PageHarness {
    /// Create a harness with an empty store and nobody signed in.
    pub fn new() -> Self {
        let store = MockStore::new();
        let time = MockTime::default();
        let identity = MockIdentity::signed_out();
        let navigator = RecordingNavigator::new();
        let page = AuctionPage::new(
            store.clone(),
            time.clone(),
            identity.clone(),
            navigator.clone(),
        );

        Self {
            page,
            store,
            time,
            identity,
            navigator,
        }
    }

    /// Seed a listing ending `ends_in` from the harness clock.
    pub async fn add_listing(&self, id: &str, item_name: &str, location: &str, ends_in: Duration) {
        let end = self.time.now() + ends_in;
        self.add_raw_listing(
            id,
            json!({
                "auctionId": id.trim_start_matches('a'),
                "itemName": item_name,
                "location": location,
                "quantity": 10,
                "pricePerUnit": 2000,
                "auctionStartDate": (self.time.now() - Duration::days(1)).to_rfc3339(),
                "auctionEndDate": end.to_rfc3339(),
                "imageUrl": format!("https://img.example/{id}.jpg"),
                "sellerEmail": "seller@example.com",
                "sellerName": null,
            }),
        )
        .await;
    }

    /// Seed a listing with arbitrary raw fields.
    pub async fn add_raw_listing(&self, id: &str, fields: Value) {
        self.store.insert(AUCTIONS_COLLECTION, id, fields).await;
    }

    /// Seed a profile with the given role.
    pub async fn add_profile(&self, uid: &str, role: &str) {
        self.store
            .insert(USERS_COLLECTION, uid, json!({ "role": role }))
            .await;
    }

    /// Mount and wait for both fetches to settle.
    pub async fn mount_and_settle(&self) {
        self.page.mount().join().await;
    }

    /// Poll `condition` until it holds; panics after two seconds.
    pub async fn wait_until(&self, what: &str, condition: impl Fn(&TestPage) -> bool) {
        let poll = async {
            while !condition(&self.page) {
                tokio::time::sleep(std::time::Duration::from_millis(5)).await;
            }
        };
        if tokio::time::timeout(std::time::Duration::from_secs(2), poll)
            .await
            .is_err()
        {
            panic!("timed out waiting for {what}");
        }
    }

    /// The ready view; panics if the page is still loading.
    pub fn ready_view(&self) -> BrowseView {
        match self.page.view() {
            PageView::Ready(view) => view,
            PageView::Loading => panic!("page is still loading"),
        }
    }

    /// Ids of the cards currently rendered.
    pub fn visible_ids(&self) -> Vec<String> {
        self.ready_view()
            .cards
            .into_iter()
            .map(|card| card.listing_id)
            .collect()
    }
}
