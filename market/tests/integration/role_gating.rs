//! Viewer role resolution and the create affordance.

use chrono::Duration;
use market::{
    CreateAffordance, NavigationIntent, PageView, TaskOutcome, ViewerRole, AUCTIONS_COLLECTION,
    USERS_COLLECTION,
};

use crate::common::PageHarness;

#[tokio::test]
async fn test_signed_out_viewer_sees_create_action() {
    // Unknown role is permissive by product decision.
    let harness = PageHarness::new();
    harness.mount_and_settle().await;

    let view = harness.ready_view();
    assert_eq!(view.role, ViewerRole::Unknown);
    assert_eq!(view.create, CreateAffordance::Shown);

    harness.page.create().unwrap();
    assert_eq!(
        harness.navigator.last(),
        Some(NavigationIntent::CreateListing)
    );
}

#[tokio::test]
async fn test_buyer_does_not_see_create_action() {
    let harness = PageHarness::new();
    harness.add_profile("u-buyer", "buyer").await;
    harness.identity.sign_in("u-buyer");
    harness.mount_and_settle().await;

    let view = harness.ready_view();
    assert_eq!(view.role, ViewerRole::Known("buyer".to_string()));
    assert_eq!(view.create, CreateAffordance::Hidden);
    assert!(harness.page.create().is_err());
    assert!(harness.navigator.intents().is_empty());
}

#[tokio::test]
async fn test_farmer_sees_create_action() {
    let harness = PageHarness::new();
    harness.add_profile("u-farmer", "farmer").await;
    harness.identity.sign_in("u-farmer");
    harness.mount_and_settle().await;

    assert_eq!(harness.ready_view().create, CreateAffordance::Shown);
}

#[tokio::test]
async fn test_signed_in_without_profile_is_unknown() {
    let harness = PageHarness::new();
    harness.identity.sign_in("ghost");

    let (_, role) = harness.page.mount().join().await;

    assert_eq!(role, TaskOutcome::Completed(ViewerRole::Unknown));
    assert_eq!(harness.ready_view().create, CreateAffordance::Shown);
    assert_eq!(harness.store.get_calls(), 1);
}

#[tokio::test]
async fn test_role_is_not_cached_across_mounts() {
    let harness = PageHarness::new();
    harness.add_profile("u1", "buyer").await;
    harness.identity.sign_in("u1");
    harness.mount_and_settle().await;
    assert_eq!(harness.page.role(), ViewerRole::Known("buyer".to_string()));

    harness.add_profile("u1", "farmer").await;
    harness.page.unmount();
    harness.mount_and_settle().await;
    assert_eq!(harness.page.role(), ViewerRole::Known("farmer".to_string()));

    harness.identity.sign_out();
    harness.page.retry().join().await;
    assert_eq!(harness.page.role(), ViewerRole::Unknown);
}

#[tokio::test]
async fn test_role_lookup_does_not_change_listings() {
    let harness = PageHarness::new();
    harness
        .add_listing("a1", "Jowar", "Solapur", Duration::days(1))
        .await;
    harness.add_profile("u1", "buyer").await;
    harness.identity.sign_in("u1");
    harness.mount_and_settle().await;

    assert_eq!(harness.visible_ids(), vec!["a1"]);
    assert_eq!(harness.ready_view().create, CreateAffordance::Hidden);
}

#[tokio::test]
async fn test_slow_role_lookup_does_not_delay_listings() {
    let harness = PageHarness::new();
    harness
        .add_listing("a1", "Jowar", "Solapur", Duration::days(1))
        .await;
    harness.add_profile("u1", "buyer").await;
    harness.identity.sign_in("u1");
    harness.store.hold_collection(USERS_COLLECTION);

    let handle = harness.page.mount();
    harness
        .wait_until("listings", |page| !page.is_loading())
        .await;

    // Grid is interactive while the role is still unresolved.
    let view = harness.ready_view();
    assert_eq!(harness.visible_ids(), vec!["a1"]);
    assert_eq!(view.role, ViewerRole::Unknown);
    assert_eq!(view.create, CreateAffordance::Shown);

    harness.store.release_collection(USERS_COLLECTION);
    let (listings, role) = handle.join().await;
    assert_eq!(listings, TaskOutcome::Completed(1));
    assert_eq!(
        role,
        TaskOutcome::Completed(ViewerRole::Known("buyer".to_string()))
    );
    assert_eq!(harness.ready_view().create, CreateAffordance::Hidden);
}

#[tokio::test]
async fn test_slow_listing_fetch_does_not_delay_role() {
    let harness = PageHarness::new();
    harness
        .add_listing("a1", "Jowar", "Solapur", Duration::days(1))
        .await;
    harness.add_profile("u1", "buyer").await;
    harness.identity.sign_in("u1");
    harness.store.hold_collection(AUCTIONS_COLLECTION);

    let handle = harness.page.mount();
    harness
        .wait_until("role", |page| {
            page.role() == ViewerRole::Known("buyer".to_string())
        })
        .await;

    assert_eq!(harness.page.view(), PageView::Loading);
    assert!(harness.page.listings().is_empty());

    harness.store.release_collection(AUCTIONS_COLLECTION);
    let (listings, _) = handle.join().await;
    assert_eq!(listings, TaskOutcome::Completed(1));
    assert_eq!(harness.visible_ids(), vec!["a1"]);
    assert_eq!(harness.ready_view().create, CreateAffordance::Hidden);
}
