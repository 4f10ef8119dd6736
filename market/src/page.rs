//! Auction page controller shared by the GUI and headless binaries.
//!
//! `AuctionPage` owns the page state: the working set of active listings,
//! the viewer role, the search term and the loading flag. Mounting starts
//! the listing fetch and the role lookup as two independent tasks; each
//! writes only its own slice of state, and only while its mount is still
//! current. Search and card building are synchronous reads over that state.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::EMPTY_GRID_MESSAGE;
use crate::error::{MarketError, MarketResult};
use crate::marketplace::{AuctionCard, CreateAffordance, Listing, SearchQuery, ViewerRole};
use crate::store::{ListingOperations, RoleResolver};
use crate::task::{MountScope, TaskOutcome};
use crate::traits::{DocumentStore, IdentityProvider, NavigationIntent, Navigator, TimeProvider};

#[derive(Debug, Default)]
struct PageState {
    loading: bool,
    listings: Arc<Vec<Listing>>,
    role: ViewerRole,
    query: SearchQuery,
    scope: Option<MountScope>,
    last_generation: u64,
}

/// What the page should render right now.
#[derive(Debug, Clone, PartialEq)]
pub enum PageView {
    /// Listings are still being fetched.
    Loading,
    Ready(BrowseView),
}

/// Render-ready contents of the auction grid.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct BrowseView {
    pub search_term: String,
    pub role: ViewerRole,
    pub create: CreateAffordance,
    pub cards: Vec<AuctionCard>,
    /// Set when no card is visible.
    pub empty_message: Option<&'static str>,
}

/// Join handles for the two fetches started by a mount.
///
/// Dropping the handle detaches the tasks; they still apply their results
/// if the mount is current when they finish.
#[derive(Debug)]
pub struct MountHandle {
    pub generation: u64,
    listings: JoinHandle<TaskOutcome<usize>>,
    role: JoinHandle<TaskOutcome<ViewerRole>>,
}

impl MountHandle {
    /// Wait for both fetches. `Completed` means the result was applied.
    pub async fn join(self) -> (TaskOutcome<usize>, TaskOutcome<ViewerRole>) {
        let listings = self.listings.await.unwrap_or_else(|e| {
            warn!("Listing fetch task failed: {}", e);
            TaskOutcome::Cancelled
        });
        let role = self.role.await.unwrap_or_else(|e| {
            warn!("Role lookup task failed: {}", e);
            TaskOutcome::Cancelled
        });
        (listings, role)
    }
}

pub struct AuctionPage<S, T, I, N>
where
    S: DocumentStore + 'static,
    T: TimeProvider + Clone + 'static,
    I: IdentityProvider + Clone + 'static,
    N: Navigator,
{
    listing_ops: ListingOperations<S, T>,
    roles: RoleResolver<S, I>,
    navigator: N,
    state: Arc<RwLock<PageState>>,
}

impl<S, T, I, N> AuctionPage<S, T, I, N>
where
    S: DocumentStore + 'static,
    T: TimeProvider + Clone + 'static,
    I: IdentityProvider + Clone + 'static,
    N: Navigator,
{
    pub fn new(store: S, time: T, identity: I, navigator: N) -> Self {
        Self {
            listing_ops: ListingOperations::new(store.clone(), time),
            roles: RoleResolver::new(store, identity),
            navigator,
            state: Arc::new(RwLock::new(PageState::default())),
        }
    }

    /// Start a mount: fetch listings and resolve the role concurrently.
    ///
    /// Any previous mount is cancelled first, so its late results are
    /// discarded. Must be called from within a Tokio runtime.
    pub fn mount(&self) -> MountHandle {
        let scope = {
            let mut state = self.state.write();
            if let Some(previous) = state.scope.take() {
                previous.cancel();
            }
            state.last_generation += 1;
            let scope = MountScope::new(state.last_generation);
            state.scope = Some(scope.clone());
            state.loading = true;
            state.listings = Arc::new(Vec::new());
            state.role = ViewerRole::Unknown;
            scope
        };
        info!("Mounting auction page (generation {})", scope.generation());

        let listings = tokio::spawn({
            let ops = self.listing_ops.clone();
            let state = self.state.clone();
            let scope = scope.clone();
            async move {
                let TaskOutcome::Completed(listings) =
                    scope.run(ops.fetch_active_listings()).await
                else {
                    debug!(
                        "Listing fetch cancelled (generation {})",
                        scope.generation()
                    );
                    return TaskOutcome::Cancelled;
                };
                let count = listings.len();
                let applied = apply_if_current(&state, &scope, move |s| {
                    s.listings = Arc::new(listings);
                    s.loading = false;
                });
                if applied {
                    TaskOutcome::Completed(count)
                } else {
                    TaskOutcome::Cancelled
                }
            }
        });

        let role = tokio::spawn({
            let roles = self.roles.clone();
            let state = self.state.clone();
            let scope = scope.clone();
            async move {
                let TaskOutcome::Completed(role) = scope.run(roles.resolve_role()).await else {
                    debug!("Role lookup cancelled (generation {})", scope.generation());
                    return TaskOutcome::Cancelled;
                };
                let resolved = role.clone();
                if apply_if_current(&state, &scope, move |s| s.role = role) {
                    TaskOutcome::Completed(resolved)
                } else {
                    TaskOutcome::Cancelled
                }
            }
        });

        MountHandle {
            generation: scope.generation(),
            listings,
            role,
        }
    }

    /// Tear down the current mount; in-flight fetches become no-ops.
    pub fn unmount(&self) {
        if let Some(scope) = self.state.write().scope.take() {
            scope.cancel();
            info!("Unmounted auction page (generation {})", scope.generation());
        }
    }

    /// Discard the current results and fetch again.
    pub fn retry(&self) -> MountHandle {
        info!("Retrying auction fetch");
        self.mount()
    }

    pub fn is_mounted(&self) -> bool {
        self.state.read().scope.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    pub fn role(&self) -> ViewerRole {
        self.state.read().role.clone()
    }

    /// The working set: every active listing from the last completed fetch.
    pub fn listings(&self) -> Arc<Vec<Listing>> {
        self.state.read().listings.clone()
    }

    pub fn search_term(&self) -> String {
        self.state.read().query.as_str().to_string()
    }

    /// Replace the search term (called on every keystroke).
    pub fn set_search_term(&self, term: &str) {
        self.state.write().query = SearchQuery::new(term);
    }

    pub fn clear_search(&self) {
        self.set_search_term("");
    }

    /// Working-set listings matching the current search term, in order.
    pub fn visible_listings(&self) -> Vec<Listing> {
        let state = self.state.read();
        state
            .listings
            .iter()
            .filter(|l| state.query.matches(l))
            .cloned()
            .collect()
    }

    /// Build the render model for the current state.
    pub fn view(&self) -> PageView {
        let state = self.state.read();
        if state.loading {
            return PageView::Loading;
        }

        let cards: Vec<AuctionCard> = state
            .listings
            .iter()
            .filter(|l| state.query.matches(l))
            .map(|l| AuctionCard::new(l, &state.query))
            .collect();
        let empty_message = cards.is_empty().then_some(EMPTY_GRID_MESSAGE);

        PageView::Ready(BrowseView {
            search_term: state.query.as_str().to_string(),
            role: state.role.clone(),
            create: state.role.create_affordance(),
            cards,
            empty_message,
        })
    }

    /// Open the bid view for a listing in the working set.
    pub fn select(&self, listing_id: &str) -> MarketResult<()> {
        let listing = self
            .state
            .read()
            .listings
            .iter()
            .find(|l| l.id == listing_id)
            .cloned()
            .ok_or_else(|| MarketError::NotFound(format!("listing {listing_id}")))?;

        info!("Opening bid view for '{}'", listing.item_name);
        self.navigator
            .navigate(NavigationIntent::Bid { auction: listing });
        Ok(())
    }

    /// Open the creation view, if the viewer's role allows it.
    pub fn create(&self) -> MarketResult<()> {
        let role = self.role();
        if !role.create_affordance().is_shown() {
            return Err(MarketError::Validation(format!(
                "role '{}' cannot create auctions",
                role.as_str().unwrap_or_default()
            )));
        }
        self.navigator.navigate(NavigationIntent::CreateListing);
        Ok(())
    }
}

impl<S, T, I, N> Drop for AuctionPage<S, T, I, N>
where
    S: DocumentStore + 'static,
    T: TimeProvider + Clone + 'static,
    I: IdentityProvider + Clone + 'static,
    N: Navigator,
{
    fn drop(&mut self) {
        if let Some(scope) = self.state.write().scope.take() {
            scope.cancel();
        }
    }
}

/// Apply `update` only if `scope` is still the page's live mount.
///
/// The check and the write happen under one lock, so an unmount cannot
/// slip in between them.
fn apply_if_current(
    state: &RwLock<PageState>,
    scope: &MountScope,
    update: impl FnOnce(&mut PageState),
) -> bool {
    let mut state = state.write();
    let current = !scope.is_cancelled()
        && state.scope.as_ref().map(MountScope::generation) == Some(scope.generation());
    if current {
        update(&mut state);
    } else {
        debug!("Dropping stale result (generation {})", scope.generation());
    }
    current
}
