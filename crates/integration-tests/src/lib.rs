//! Shared fixtures for the cross-crate test suite.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use domains::{FeedAuthor, FeedBackend, FeedPost, Post, PostKind, SlotStore};
use services::{ContentStore, FeedClient};
use storage_adapters::{MemorySlotStore, SimulatedFeedBackend};
use uuid::Uuid;

pub const PAGE_SIZE: u64 = 10;

/// A content store over a shared in-memory slot store, so tests can reopen
/// "the same disk" with a second store instance.
pub fn store_over(slots: Arc<MemorySlotStore>) -> ContentStore {
    ContentStore::new(slots)
}

pub fn fresh_store() -> (Arc<MemorySlotStore>, ContentStore) {
    let slots = Arc::new(MemorySlotStore::new());
    let store = ContentStore::new(Arc::clone(&slots) as Arc<dyn SlotStore>);
    (slots, store)
}

pub fn viewer() -> FeedAuthor {
    FeedAuthor {
        id: "current-user".into(),
        name: "Você".into(),
        avatar_url: None,
    }
}

pub fn neighbor(i: usize) -> FeedAuthor {
    FeedAuthor {
        id: format!("user-{i}"),
        name: format!("Vizinho {i}"),
        avatar_url: None,
    }
}

pub fn feed_post(i: usize, likes: i64, liked: bool) -> FeedPost {
    FeedPost {
        id: Uuid::now_v7(),
        content: format!("post {i}"),
        author: neighbor(i),
        image_urls: Vec::new(),
        created_at: Utc::now(),
        likes_count: likes,
        is_liked_by_viewer: liked,
        comments_count: 0,
        is_author: false,
    }
}

/// A zero-latency backend holding `n` numbered posts, plus a client over it.
pub fn feed_fixture(n: usize) -> (Arc<SimulatedFeedBackend>, FeedClient) {
    let posts = (0..n).map(|i| feed_post(i, 0, false)).collect();
    let backend = Arc::new(SimulatedFeedBackend::with_posts(
        viewer(),
        posts,
        Duration::ZERO,
    ));
    let client = FeedClient::new(Arc::clone(&backend) as Arc<dyn FeedBackend>, PAGE_SIZE);
    (backend, client)
}

pub fn board_post(title: &str, kind: PostKind) -> Post {
    Post {
        id: Uuid::now_v7(),
        title: title.into(),
        desc: "uma descrição suficientemente longa".into(),
        author: "Vizinho".into(),
        kind,
        image: None,
        coordinates: None,
        business_id: None,
        service_provider_id: None,
        created_at: Utc::now(),
    }
}
