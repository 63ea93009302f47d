//! # Core Traits (Ports)
//!
//! Adapter crates implement these traits; services only see the trait
//! objects. With the `testing` feature enabled, mockall generates
//! `MockSlotStore` / `MockFeedBackend` for external test crates.

use crate::error::Result;
use crate::models::{FeedPage, FeedPost, NewFeedPost};
use async_trait::async_trait;
use uuid::Uuid;

/// Key-value persistence for whole collections, one JSON payload per fixed
/// slot name. The analogue of the browser's local storage: no schema version
/// tag, no migration. Unparseable payloads are the caller's problem and fall
/// back to defaults at the service layer.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait SlotStore: Send + Sync {
    /// Returns the raw payload, or `None` when the slot was never written.
    async fn get(&self, slot: &str) -> Result<Option<String>>;

    /// Overwrites the slot with the full serialized collection.
    async fn put(&self, slot: &str, payload: &str) -> Result<()>;

    async fn remove(&self, slot: &str) -> Result<()>;
}

/// The simulated remote feed endpoint. Every call is latency-simulated and
/// must be assumed fallible; a failure never partially applies a mutation.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait FeedBackend: Send + Sync {
    /// Slices one fixed-size page out of the full list starting at
    /// `cursor * limit`. `next_cursor` is `None` once the slice reaches
    /// the end.
    async fn fetch_page(&self, cursor: u64, limit: u64) -> Result<FeedPage>;

    /// Inserts a new post at the head of the list and returns it.
    async fn create_post(&self, new_post: NewFeedPost) -> Result<FeedPost>;

    /// Flips the viewer's like on a post, adjusting `likes_count` by one.
    async fn toggle_like(&self, post_id: Uuid) -> Result<()>;

    async fn delete_post(&self, post_id: Uuid) -> Result<()>;
}
