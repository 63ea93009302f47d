//! Simulated remote feed endpoint.
//!
//! A fixed in-memory list behind an async lock, with configurable latency
//! on every call and scripted failure injection so callers' rollback paths
//! can be exercised deterministically.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use domains::{Error, FeedAuthor, FeedBackend, FeedPage, FeedPost, NewFeedPost, Result};
use tokio::sync::RwLock;
use tracing::trace;
use uuid::Uuid;

pub struct SimulatedFeedBackend {
    /// Who the session viewer is; authored posts are attributed to them.
    viewer: FeedAuthor,
    posts: RwLock<Vec<FeedPost>>,
    latency: Duration,
    /// Number of upcoming calls that should reject.
    scripted_failures: AtomicU32,
}

impl SimulatedFeedBackend {
    pub fn new(viewer: FeedAuthor, latency: Duration) -> Self {
        Self::with_posts(viewer, Vec::new(), latency)
    }

    pub fn with_posts(viewer: FeedAuthor, posts: Vec<FeedPost>, latency: Duration) -> Self {
        Self {
            viewer,
            posts: RwLock::new(posts),
            latency,
            scripted_failures: AtomicU32::new(0),
        }
    }

    /// Makes the next call reject with a transport error. Stackable.
    pub fn fail_next(&self) {
        self.scripted_failures.fetch_add(1, Ordering::SeqCst);
    }

    async fn simulate_network(&self) -> Result<()> {
        tokio::time::sleep(self.latency).await;
        let mut pending = self.scripted_failures.load(Ordering::SeqCst);
        while pending > 0 {
            match self.scripted_failures.compare_exchange(
                pending,
                pending - 1,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => return Err(Error::Transport("simulated network failure".into())),
                Err(actual) => pending = actual,
            }
        }
        Ok(())
    }
}

#[async_trait]
impl FeedBackend for SimulatedFeedBackend {
    async fn fetch_page(&self, cursor: u64, limit: u64) -> Result<FeedPage> {
        self.simulate_network().await?;
        let posts = self.posts.read().await;

        let start = (cursor * limit) as usize;
        let end = start.saturating_add(limit as usize).min(posts.len());
        let data = if start < posts.len() {
            posts[start..end].to_vec()
        } else {
            Vec::new()
        };
        let next_cursor = (end < posts.len()).then(|| cursor + 1);

        trace!(cursor, returned = data.len(), ?next_cursor, "feed page served");
        Ok(FeedPage { data, next_cursor })
    }

    async fn create_post(&self, new_post: NewFeedPost) -> Result<FeedPost> {
        self.simulate_network().await?;
        let post = FeedPost {
            id: Uuid::now_v7(),
            content: new_post.content,
            author: self.viewer.clone(),
            image_urls: new_post.image_urls,
            created_at: Utc::now(),
            likes_count: 0,
            is_liked_by_viewer: false,
            comments_count: 0,
            is_author: true,
        };
        self.posts.write().await.insert(0, post.clone());
        Ok(post)
    }

    async fn toggle_like(&self, post_id: Uuid) -> Result<()> {
        self.simulate_network().await?;
        let mut posts = self.posts.write().await;
        let post = posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or_else(|| Error::NotFound("feed post", post_id.to_string()))?;
        post.is_liked_by_viewer = !post.is_liked_by_viewer;
        post.likes_count += if post.is_liked_by_viewer { 1 } else { -1 };
        Ok(())
    }

    async fn delete_post(&self, post_id: Uuid) -> Result<()> {
        self.simulate_network().await?;
        self.posts.write().await.retain(|p| p.id != post_id);
        Ok(())
    }
}
