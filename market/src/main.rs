//! Agri-Link auction browser - Main entry point.
// Dioxus rsx! macro generates deeply nested types requiring higher recursion limit
#![recursion_limit = "512"]

mod app;

use market::error::MarketResult;
use market::{JsonFileStore, MarketConfig, StaticIdentity};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::app::{SharedAppState, SHARED_STATE};

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> MarketResult<()> {
    init_logging();
    info!("Starting Agri-Link auction browser");

    let config = MarketConfig::from_env()?;
    info!("Using document store: {}", config.store_path.display());
    if !config.store_path.exists() {
        warn!(
            "Store file {} does not exist; the auction grid will be empty",
            config.store_path.display()
        );
    }
    if config.identity.is_none() {
        info!("No signed-in identity configured");
    }

    let app_state = SharedAppState::new(
        JsonFileStore::new(config.store_path.clone()),
        StaticIdentity::new(config.identity),
    );
    SHARED_STATE.set(app_state.clone()).ok();

    // Launch Dioxus UI (blocks until window is closed)
    dioxus::launch(app::app);

    info!("UI closed, shutting down...");
    app_state.page.unmount();

    Ok(())
}
