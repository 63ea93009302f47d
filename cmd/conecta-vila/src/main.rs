//! Conecta Vila — headless community content engine.
//!
//! Assembles the adapters into the service layer: file-backed slot store,
//! simulated feed backend, content store and notification center, then sits
//! on the store's event stream until shutdown.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use configs::Settings;
use services::{spawn_timer, ContentStore, FeedClient, NotificationCenter, PostFilter};
use storage_adapters::{seed, FileSlotStore, SimulatedFeedBackend};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::load().context("loading settings")?;
    info!(neighborhood = %settings.neighborhood, data_dir = %settings.data_dir.display(), "starting");

    // 1. Persistence adapter
    let slots = Arc::new(FileSlotStore::new(settings.data_dir.clone()));

    // 2. Content store: load persisted collections, seed the rest
    let seed_data = seed::neighborhood();
    let store = Arc::new(ContentStore::new(slots));
    store.load(seed_data.directory).await;
    for post in seed_data.posts.into_iter().rev() {
        store.create_post(post);
    }
    for alert in seed_data.alerts.into_iter().rev() {
        store.create_alert(alert);
    }
    for (room, participant, message) in seed_data.messages {
        store.send_message(&room, &participant, message);
    }

    // 3. Feed client over the simulated backend
    let backend = Arc::new(SimulatedFeedBackend::with_posts(
        seed::viewer(),
        seed_data.feed_posts,
        Duration::from_millis(settings.feed.latency_ms),
    ));
    let feed = FeedClient::new(backend, settings.feed.page_size);
    let first_page = feed.next_page().await.context("fetching first feed page")?;
    info!(
        posts = store.posts(&PostFilter::default()).len(),
        feed = first_page.data.len(),
        "collections ready"
    );

    // 4. Notifications: simulated background event for the seeded session
    let notifications = Arc::new(NotificationCenter::new());
    spawn_timer(
        Arc::clone(&notifications),
        Duration::from_secs(settings.notifications.delay_secs),
        Some("Você".to_string()),
    );

    // 5. Log store events until ctrl-c
    let mut events = store.subscribe();
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => info!(?event, "store event"),
                Err(RecvError::Lagged(missed)) => warn!(missed, "store event stream lagged"),
                Err(RecvError::Closed) => break,
            },
            _ = tokio::signal::ctrl_c() => {
                info!(unread = notifications.unread_count(), "shutting down");
                break;
            }
        }
    }

    Ok(())
}
