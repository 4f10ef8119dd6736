//! Listing acquisition, search and navigation through the page.

use chrono::Duration;
use market::{MatchFragment, NavigationIntent, PageView, TaskOutcome, TimeProvider};
use serde_json::json;

use crate::common::PageHarness;

#[tokio::test]
async fn test_only_unexpired_listings_are_shown() {
    let harness = PageHarness::new();
    harness
        .add_listing("a1", "Wheat", "Ludhiana", -Duration::days(1))
        .await;
    harness
        .add_listing("a2", "Rice", "Karnal", Duration::days(1))
        .await;

    harness.mount_and_settle().await;

    assert_eq!(harness.visible_ids(), vec!["a2".to_string()]);
}

#[tokio::test]
async fn test_store_order_is_preserved() {
    let harness = PageHarness::new();
    for (id, item) in [("a3", "Onion"), ("a1", "Garlic"), ("a2", "Ginger")] {
        harness
            .add_listing(id, item, "Nashik", Duration::hours(5))
            .await;
    }

    harness.mount_and_settle().await;

    assert_eq!(harness.visible_ids(), vec!["a3", "a1", "a2"]);
}

#[tokio::test]
async fn test_search_matches_item_name_or_location() {
    let harness = PageHarness::new();
    harness
        .add_listing("a1", "Basmati Rice", "Delhi", Duration::days(2))
        .await;
    harness
        .add_listing("a2", "Wheat", "Rice Town", Duration::days(2))
        .await;
    harness
        .add_listing("a3", "Cotton", "Akola", Duration::days(2))
        .await;
    harness.mount_and_settle().await;

    harness.page.set_search_term("rice");
    assert_eq!(harness.visible_ids(), vec!["a1", "a2"]);

    harness.page.set_search_term("RICE");
    assert_eq!(harness.visible_ids(), vec!["a1", "a2"]);

    harness.page.set_search_term("");
    assert_eq!(harness.visible_ids(), vec!["a1", "a2", "a3"]);
}

#[tokio::test]
async fn test_every_keystroke_recomputes_without_refetching() {
    let harness = PageHarness::new();
    harness
        .add_listing("a1", "Sugarcane", "Pune District", Duration::days(1))
        .await;
    harness
        .add_listing("a2", "Soybean", "Latur", Duration::days(1))
        .await;
    harness.mount_and_settle().await;
    let fetches = harness.store.list_calls();

    let mut typed = String::new();
    for ch in "pun".chars() {
        typed.push(ch);
        harness.page.set_search_term(&typed);
        assert_eq!(harness.visible_ids(), vec!["a1"]);
    }

    let view = harness.ready_view();
    assert_eq!(
        view.cards[0].location,
        vec![
            MatchFragment {
                text: "Pun".to_string(),
                matched: true
            },
            MatchFragment {
                text: "e District".to_string(),
                matched: false
            },
        ]
    );
    assert_eq!(harness.store.list_calls(), fetches);
}

#[tokio::test]
async fn test_no_match_shows_empty_message_and_clear_restores() {
    let harness = PageHarness::new();
    harness
        .add_listing("a1", "Maize", "Indore", Duration::days(1))
        .await;
    harness.mount_and_settle().await;

    harness.page.set_search_term("saffron");
    let view = harness.ready_view();
    assert!(view.cards.is_empty());
    assert_eq!(view.empty_message, Some("No active auctions available."));

    harness.page.clear_search();
    assert_eq!(harness.visible_ids(), vec!["a1"]);
    assert_eq!(harness.ready_view().empty_message, None);
}

#[tokio::test]
async fn test_selecting_a_card_hands_off_full_listing() {
    let harness = PageHarness::new();
    harness
        .add_listing("a7", "Turmeric", "Erode", Duration::days(3))
        .await;
    harness.mount_and_settle().await;

    harness.page.select("a7").unwrap();

    let Some(NavigationIntent::Bid { auction }) = harness.navigator.last() else {
        panic!("expected a bid intent");
    };
    assert_eq!(auction.id, "a7");
    assert_eq!(auction.auction_id, "7");
    assert_eq!(auction.location, "Erode");
    assert_eq!(auction.price_per_unit, 2000.0);
    assert_eq!(auction.seller_email, "seller@example.com");
    assert_eq!(auction.seller_name, None);
}

#[tokio::test]
async fn test_listing_with_object_location_is_searchable_by_name() {
    let harness = PageHarness::new();
    let end = (harness.time.now() + Duration::days(1)).to_rfc3339();
    harness
        .add_raw_listing(
            "geo",
            json!({
                "itemName": "Mustard",
                "location": { "lat": 26.9, "lng": 75.8 },
                "auctionEndDate": end,
            }),
        )
        .await;
    harness.mount_and_settle().await;

    harness.page.set_search_term("must");
    let view = harness.ready_view();
    assert_eq!(view.cards.len(), 1);
    // Empty location with a non-empty query renders nothing to highlight.
    assert!(view.cards[0].location.is_empty());
    assert_eq!(view.cards[0].unit, "/QT");
}

#[tokio::test]
async fn test_listings_appear_only_after_fetch_completes() {
    let harness = PageHarness::new();
    harness
        .add_listing("a1", "Wheat", "Ludhiana", Duration::days(1))
        .await;
    harness.store.hold();

    let handle = harness.page.mount();
    assert_eq!(harness.page.view(), PageView::Loading);
    assert!(harness.page.listings().is_empty());

    harness.store.release();
    let (listings, _) = handle.join().await;
    assert_eq!(listings, TaskOutcome::Completed(1));
    assert_eq!(harness.visible_ids(), vec!["a1"]);
}

#[tokio::test]
async fn test_retry_picks_up_new_listings() {
    let harness = PageHarness::new();
    harness.mount_and_settle().await;
    assert!(harness.visible_ids().is_empty());

    harness
        .add_listing("a1", "Bajra", "Jodhpur", Duration::days(1))
        .await;
    harness.page.retry().join().await;

    assert_eq!(harness.visible_ids(), vec!["a1"]);
}
