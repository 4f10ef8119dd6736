//! Failure handling: unreachable store, malformed records, stale mounts.

use chrono::Duration;
use market::mocks::MockStoreFailure;
use market::{CreateAffordance, MarketError, PageView, ViewerRole, USERS_COLLECTION};
use serde_json::json;

use crate::common::PageHarness;

#[tokio::test]
async fn test_unreachable_store_shows_empty_grid() {
    let harness = PageHarness::new();
    harness
        .add_listing("a1", "Wheat", "Ludhiana", Duration::days(1))
        .await;
    harness.store.set_fail_mode(Some(MockStoreFailure::All)).await;

    harness.mount_and_settle().await;

    let view = harness.ready_view();
    assert!(view.cards.is_empty());
    assert_eq!(view.empty_message, Some("No active auctions available."));
    assert_eq!(view.create, CreateAffordance::Shown);
}

#[tokio::test]
async fn test_retry_after_store_recovers() {
    let harness = PageHarness::new();
    harness
        .add_listing("a1", "Wheat", "Ludhiana", Duration::days(1))
        .await;
    harness.store.set_fail_mode(Some(MockStoreFailure::Reads)).await;
    harness.mount_and_settle().await;
    assert!(harness.visible_ids().is_empty());

    harness.store.set_fail_mode(None).await;
    harness.page.retry().join().await;

    assert_eq!(harness.visible_ids(), vec!["a1"]);
}

#[tokio::test]
async fn test_profile_failure_does_not_block_listings() {
    let harness = PageHarness::new();
    harness
        .add_listing("a1", "Wheat", "Ludhiana", Duration::days(1))
        .await;
    harness.add_profile("u1", "buyer").await;
    harness.identity.sign_in("u1");
    harness
        .store
        .set_fail_mode(Some(MockStoreFailure::OnCollection(
            USERS_COLLECTION.to_string(),
        )))
        .await;

    harness.mount_and_settle().await;

    assert_eq!(harness.visible_ids(), vec!["a1"]);
    assert_eq!(harness.page.role(), ViewerRole::Unknown);
    assert_eq!(harness.ready_view().create, CreateAffordance::Shown);
}

#[tokio::test]
async fn test_malformed_records_are_skipped() {
    let harness = PageHarness::new();
    harness
        .add_listing("good", "Wheat", "Ludhiana", Duration::days(1))
        .await;
    harness
        .add_raw_listing(
            "bad-date",
            json!({ "itemName": "Rice", "auctionEndDate": "soon" }),
        )
        .await;
    harness
        .add_raw_listing("no-date", json!({ "itemName": "Cotton" }))
        .await;
    harness
        .add_raw_listing("not-an-object", json!(["unexpected"]))
        .await;

    harness.mount_and_settle().await;

    assert_eq!(harness.visible_ids(), vec!["good"]);
}

#[tokio::test]
async fn test_unmount_before_completion_leaves_state_untouched() {
    let harness = PageHarness::new();
    harness
        .add_listing("a1", "Wheat", "Ludhiana", Duration::days(1))
        .await;
    harness.add_profile("u1", "buyer").await;
    harness.identity.sign_in("u1");
    harness.store.hold();

    let handle = harness.page.mount();
    harness.page.unmount();
    harness.store.release();
    let (listings, role) = handle.join().await;

    assert!(listings.is_cancelled());
    assert!(role.is_cancelled());
    assert_eq!(harness.page.view(), PageView::Loading);
    assert!(harness.page.listings().is_empty());
    assert_eq!(harness.page.role(), ViewerRole::Unknown);
}

#[tokio::test]
async fn test_selecting_unknown_listing_is_not_found() {
    let harness = PageHarness::new();
    harness.mount_and_settle().await;

    let result = harness.page.select("missing");
    assert!(matches!(result, Err(MarketError::NotFound(_))));
    assert!(harness.navigator.intents().is_empty());
}

#[tokio::test]
async fn test_expiry_is_judged_at_mount_time() {
    let harness = PageHarness::new();
    harness
        .add_listing("a1", "Wheat", "Ludhiana", Duration::minutes(30))
        .await;
    harness.mount_and_settle().await;
    assert_eq!(harness.visible_ids(), vec!["a1"]);

    // The working set is a snapshot; it only changes on the next fetch.
    harness.time.advance(Duration::hours(1));
    assert_eq!(harness.visible_ids(), vec!["a1"]);

    harness.page.retry().join().await;
    assert!(harness.visible_ids().is_empty());
}
