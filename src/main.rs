//! LitMT client diagnostic tool
//!
//! Exercises the client core against a running backend: reads the local
//! session, refreshes the library, and reports what a front-end would
//! render. Useful for checking a deployment without a browser.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use litmt_client::api::ApiClient;
use litmt_client::library::{self, LibraryCache, LoadState, ViewPreferences};
use litmt_client::session::SessionStore;
use litmt_client::storage::FileStorage;
use litmt_client::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "litmt_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing::info!("LitMT client v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Backend: {}", config.backend_base_url);

    let storage = Arc::new(FileStorage::open(&config.state_dir)?);
    let sessions = SessionStore::new(storage.clone());
    match sessions.current_session() {
        Some(session) => tracing::info!(
            "Signed in as {} (admin: {})",
            session.user.username,
            session.is_admin()
        ),
        None => tracing::info!("Not signed in"),
    }

    let api = ApiClient::new(&config);
    let cache = LibraryCache::new();
    if let Err(err) = cache.refresh(&api).await {
        tracing::warn!("{}", err.user_message("Failed to load books"));
    }

    match cache.state().await {
        LoadState::Loaded => {
            let prefs = ViewPreferences::load(storage.as_ref());
            let books = cache.books().await;
            let visible = library::sorted(&library::filtered(&books, ""), prefs.sort_key);
            tracing::info!(
                "Library loaded: {} books ({} view, sorted by {})",
                visible.len(),
                prefs.view_mode,
                prefs.sort_key
            );
            for book in visible.iter().take(10) {
                tracing::info!(
                    "  {} by {} ({} translations)",
                    book.title,
                    book.display_author(),
                    book.translated_books.len()
                );
            }
        }
        LoadState::Error(message) => tracing::warn!("Library unavailable: {}", message),
        LoadState::Loading => {}
    }

    Ok(())
}
