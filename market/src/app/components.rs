//! UI components for the auction browser.

use dioxus::prelude::*;
use market::{config, AuctionCard, MatchFragment, NavigationIntent, PageView};

use crate::app::state::SHARED_STATE;

/// Loading indicator shown until the first fetch completes.
#[component]
fn Loader() -> Element {
    rsx! {
        div {
            class: "loader",
            div { class: "spinner" }
            span { "Loading auctions..." }
        }
    }
}

/// Search box with a clear button.
#[component]
fn SearchBar(term: String, on_input: EventHandler<String>, on_clear: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "search-bar",
            input {
                r#type: "text",
                placeholder: config::SEARCH_PLACEHOLDER,
                value: "{term}",
                oninput: move |e| on_input.call(e.value()),
            }
            if !term.is_empty() {
                button {
                    class: "clear-btn",
                    "aria-label": "Clear search",
                    tabindex: "-1",
                    onclick: move |_| on_clear.call(()),
                    "×"
                }
            }
        }
    }
}

/// Location text with search hits emphasised.
#[component]
fn HighlightedLocation(fragments: Vec<MatchFragment>) -> Element {
    rsx! {
        span {
            class: "location",
            for (index, fragment) in fragments.iter().enumerate() {
                if fragment.matched {
                    span { key: "{index}", class: "highlight", "{fragment.text}" }
                } else {
                    span { key: "{index}", "{fragment.text}" }
                }
            }
        }
    }
}

/// A single auction card.
#[component]
fn AuctionCardView(card: AuctionCard, on_select: EventHandler<String>) -> Element {
    let listing_id = card.listing_id.clone();

    rsx! {
        div {
            class: "auction-card",
            onclick: move |_| on_select.call(listing_id.clone()),

            div {
                class: "card-image",
                img { src: "{card.image_url}", alt: "{card.image_alt}" }
                span { class: "badge", "{card.badge}" }
            }

            div {
                class: "card-body",
                h3 { "{card.item_name}" }
                div {
                    class: "price-row",
                    span { class: "price", "{card.price}" }
                    span { class: "unit", "{card.unit}" }
                    span { class: "quantity", "{card.quantity}" }
                }
                HighlightedLocation { fragments: card.location.clone() }
                div { class: "ends", "{card.ends}" }
            }
        }
    }
}

/// Placeholder for the routes this surface hands off to.
#[component]
fn RouteView(intent: NavigationIntent, on_back: EventHandler<()>) -> Element {
    let title = match &intent {
        NavigationIntent::Bid { auction } => format!("Bid on {}", auction.item_name),
        NavigationIntent::CreateListing => "Add Auction".to_string(),
    };

    rsx! {
        div {
            class: "route-view",
            h2 { "{title}" }
            p { class: "route", "{intent.route()}" }
            button {
                class: "back-btn",
                onclick: move |_| on_back.call(()),
                "Back to auctions"
            }
        }
    }
}

/// Main application component.
pub fn app() -> Element {
    let state = SHARED_STATE
        .get()
        .expect("SHARED_STATE must be initialized before launching UI")
        .clone();

    // Mount once; unmount cancels fetches still in flight
    use_hook({
        let page = state.page.clone();
        move || {
            page.mount();
        }
    });
    use_drop({
        let page = state.page.clone();
        move || page.unmount()
    });

    let mut view = use_signal(|| state.page.view());
    let mut route = use_signal(|| state.router.current());

    // Poll for fetch completion and navigation
    let _poller = use_resource({
        let state = state.clone();
        move || {
            let state = state.clone();
            async move {
                loop {
                    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
                    let latest = state.page.view();
                    if *view.peek() != latest {
                        view.set(latest);
                    }
                    let current = state.router.current();
                    if *route.peek() != current {
                        route.set(current);
                    }
                }
            }
        }
    });

    let on_input = {
        let page = state.page.clone();
        move |term: String| {
            page.set_search_term(&term);
            view.set(page.view());
        }
    };
    let on_clear = {
        let page = state.page.clone();
        move |()| {
            page.clear_search();
            view.set(page.view());
        }
    };
    let on_select = {
        let state = state.clone();
        move |listing_id: String| {
            if let Err(e) = state.page.select(&listing_id) {
                tracing::warn!("Cannot open listing: {}", e);
            }
            route.set(state.router.current());
        }
    };
    let on_add = {
        let state = state.clone();
        move |_| {
            if let Err(e) = state.page.create() {
                tracing::warn!("Cannot open creation view: {}", e);
            }
            route.set(state.router.current());
        }
    };
    let on_retry = {
        let page = state.page.clone();
        move |_| {
            page.retry();
            view.set(page.view());
        }
    };
    let on_back = {
        let router = state.router.clone();
        move |()| {
            router.back();
            route.set(None);
        }
    };

    if let Some(intent) = route.read().clone() {
        return rsx! {
            document::Stylesheet { href: asset!("/assets/styles.css") }
            RouteView { intent: intent, on_back: on_back }
        };
    }

    let current = view.read().clone();
    let browse = match current {
        PageView::Loading => {
            return rsx! {
                document::Stylesheet { href: asset!("/assets/styles.css") }
                Loader {}
            };
        }
        PageView::Ready(browse) => browse,
    };

    rsx! {
        document::Stylesheet { href: asset!("/assets/styles.css") }

        div {
            class: "container",

            SearchBar {
                term: browse.search_term.clone(),
                on_input: on_input,
                on_clear: on_clear,
            }

            if browse.create.is_shown() {
                div {
                    class: "actions",
                    button {
                        class: "add-btn",
                        onclick: on_add,
                        "Add Auction"
                    }
                }
            }

            div {
                class: "auction-grid",
                for card in browse.cards.iter().cloned() {
                    AuctionCardView {
                        key: "{card.listing_id}",
                        card: card,
                        on_select: on_select.clone(),
                    }
                }
            }

            if let Some(message) = browse.empty_message {
                div {
                    class: "empty",
                    p { "{message}" }
                    button {
                        class: "retry-btn",
                        onclick: on_retry,
                        "Retry"
                    }
                }
            }
        }
    }
}
