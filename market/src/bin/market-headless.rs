//! Headless auction browser for scripted and E2E testing.
//!
//! Drives one auction page over a JSON file store with JSON-over-stdio IPC.
//! Logging goes to stderr; stdout is reserved for the IPC protocol.
//!
//! Usage:
//!   market-headless [--store <path>] [--uid <uid>]
//!
//! On startup the page is mounted and a `Ready` JSON line is written to
//! stdout. Then `HeadlessCommand` JSON lines are read from stdin and answered
//! with `HeadlessResponse` lines. Navigation intents are written as
//! `Navigate` event lines as they happen.

use std::io::Write;

use market::error::{MarketError, MarketResult};
use market::{
    AuctionPage, ChannelNavigator, Identity, JsonFileStore, MarketConfig, NavigationIntent,
    PageView, StaticIdentity, SystemTimeProvider,
};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

type HeadlessPage =
    AuctionPage<JsonFileStore, SystemTimeProvider, StaticIdentity, ChannelNavigator>;

// ── IPC types ────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ReadyEvent {
    event: &'static str,
    store: String,
    active_listings: usize,
    role: Option<String>,
}

#[derive(Serialize)]
struct NavigateEvent<'a> {
    event: &'static str,
    route: &'static str,
    #[serde(flatten)]
    intent: &'a NavigationIntent,
}

#[derive(Deserialize)]
#[serde(tag = "cmd")]
enum HeadlessCommand {
    Search { query: String },
    ClearSearch,
    View,
    Select { listing_id: String },
    Create,
    Retry,
    Shutdown,
}

#[derive(Serialize)]
#[serde(tag = "status")]
enum HeadlessResponse {
    Ok { data: Option<serde_json::Value> },
    Err { message: String },
}

// ── Helpers ──────────────────────────────────────────────────────────

fn parse_args(mut config: MarketConfig) -> MarketResult<MarketConfig> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--store" => {
                let path = args
                    .next()
                    .ok_or_else(|| MarketError::Config("--store needs a path".to_string()))?;
                config = config.with_store_path(path);
            }
            "--uid" => {
                let uid = args
                    .next()
                    .ok_or_else(|| MarketError::Config("--uid needs a value".to_string()))?;
                config = config.with_identity(Some(Identity::new(uid)));
            }
            other => {
                return Err(MarketError::Config(format!(
                    "Unknown argument '{other}'. Usage: market-headless [--store <path>] [--uid <uid>]"
                )));
            }
        }
    }
    Ok(config)
}

fn init_logging_stderr() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .init();
}

fn emit_json(value: &impl Serialize) {
    let line = match serde_json::to_string(value) {
        Ok(line) => line,
        Err(e) => {
            error!("Failed to serialize IPC message: {}", e);
            return;
        }
    };
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{line}").and_then(|()| stdout.flush()) {
        error!("stdout write failed: {}", e);
    }
}

fn view_json(page: &HeadlessPage) -> MarketResult<serde_json::Value> {
    let value = match page.view() {
        PageView::Loading => serde_json::json!({ "loading": true }),
        PageView::Ready(view) => serde_json::to_value(view)
            .map_err(|e| MarketError::Serialization(e.to_string()))?,
    };
    Ok(value)
}

fn respond(result: MarketResult<Option<serde_json::Value>>) {
    match result {
        Ok(data) => emit_json(&HeadlessResponse::Ok { data }),
        Err(e) => emit_json(&HeadlessResponse::Err {
            message: e.to_string(),
        }),
    }
}

// ── Main ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> MarketResult<()> {
    init_logging_stderr();
    let config = parse_args(MarketConfig::from_env()?)?;
    info!(
        "market-headless starting (store={}, signed in={})",
        config.store_path.display(),
        config.identity.is_some()
    );

    let (navigator, mut intents) = ChannelNavigator::new();
    let page: HeadlessPage = AuctionPage::new(
        JsonFileStore::new(config.store_path.clone()),
        SystemTimeProvider::new(),
        StaticIdentity::new(config.identity.clone()),
        navigator,
    );

    // Forward navigation intents as events
    tokio::spawn(async move {
        while let Some(intent) = intents.recv().await {
            emit_json(&NavigateEvent {
                event: "Navigate",
                route: intent.route(),
                intent: &intent,
            });
        }
    });

    page.mount().join().await;
    emit_json(&ReadyEvent {
        event: "Ready",
        store: config.store_path.display().to_string(),
        active_listings: page.listings().len(),
        role: page.role().as_str().map(str::to_string),
    });
    info!("Ready event emitted");

    // Command loop
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(l)) => l,
            Ok(None) => {
                info!("stdin closed, shutting down");
                break;
            }
            Err(e) => {
                error!("stdin read error: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let cmd: HeadlessCommand = match serde_json::from_str(&line) {
            Ok(c) => c,
            Err(e) => {
                emit_json(&HeadlessResponse::Err {
                    message: format!("Invalid command JSON: {e}"),
                });
                continue;
            }
        };

        match cmd {
            HeadlessCommand::Search { query } => {
                page.set_search_term(&query);
                respond(view_json(&page).map(Some));
            }
            HeadlessCommand::ClearSearch => {
                page.clear_search();
                respond(view_json(&page).map(Some));
            }
            HeadlessCommand::View => respond(view_json(&page).map(Some)),
            HeadlessCommand::Select { listing_id } => {
                respond(page.select(&listing_id).map(|()| None));
            }
            HeadlessCommand::Create => respond(page.create().map(|()| None)),
            HeadlessCommand::Retry => {
                page.retry().join().await;
                respond(view_json(&page).map(Some));
            }
            HeadlessCommand::Shutdown => {
                info!("Shutdown command received");
                emit_json(&HeadlessResponse::Ok { data: None });
                break;
            }
        }
    }

    page.unmount();
    info!("Shutdown complete");
    Ok(())
}
