//! Cursor-paginated feed client with optimistic mutations.
//!
//! Wraps a [`FeedBackend`] and keeps the pages fetched so far as the local
//! view. Mutations follow an explicit three-phase protocol: snapshot the
//! affected record, apply the change locally, then settle — commit on
//! backend success or restore the snapshot on failure. Either way the view
//! is reconciled against the backend afterwards.

use std::sync::{Arc, RwLock};

use domains::{Error, FeedBackend, FeedPage, FeedPost, NewFeedPost, Result};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::validate;

/// Where an optimistic mutation currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationPhase {
    /// Snapshot taken, local change applied, backend call in flight.
    Applied,
    /// Backend confirmed; the local change is now truth.
    Committed,
    /// Backend rejected; the snapshot was restored.
    RolledBack,
}

/// One optimistic mutation over a single record: snapshot, apply,
/// settle(commit | rollback).
struct OptimisticMutation<T> {
    snapshot: T,
    phase: MutationPhase,
}

impl<T: Clone> OptimisticMutation<T> {
    /// Captures the pre-mutation snapshot. The caller applies the change
    /// to its own view immediately after.
    fn applied(snapshot: T) -> Self {
        Self {
            snapshot,
            phase: MutationPhase::Applied,
        }
    }

    fn commit(&mut self) {
        self.phase = MutationPhase::Committed;
    }

    /// Yields the snapshot to restore. Legal only while still `Applied`.
    fn rollback(&mut self) -> T {
        debug_assert_eq!(self.phase, MutationPhase::Applied);
        self.phase = MutationPhase::RolledBack;
        self.snapshot.clone()
    }

    #[cfg(test)]
    fn phase(&self) -> MutationPhase {
        self.phase
    }
}

struct FeedView {
    posts: Vec<FeedPost>,
    /// Cursor for the next `fetch_page` call; `None` once exhausted.
    next_cursor: Option<u64>,
    /// Pages currently covered by `posts`, used to rebuild the view when
    /// reconciling with the backend.
    pages_loaded: u64,
}

pub struct FeedClient {
    backend: Arc<dyn FeedBackend>,
    page_size: u64,
    view: RwLock<FeedView>,
}

impl FeedClient {
    pub fn new(backend: Arc<dyn FeedBackend>, page_size: u64) -> Self {
        Self {
            backend,
            page_size,
            view: RwLock::new(FeedView {
                posts: Vec::new(),
                next_cursor: Some(0),
                pages_loaded: 0,
            }),
        }
    }

    /// Snapshot of the local view, in feed order.
    pub fn posts(&self) -> Vec<FeedPost> {
        self.view.read().expect("feed view lock poisoned").posts.clone()
    }

    /// Fetches the next page and appends it to the local view.
    ///
    /// Walking pages from the start until `next_cursor` is `None` yields
    /// the backend list exactly once per item, in order. Once exhausted,
    /// further calls return an empty page without touching the backend.
    pub async fn next_page(&self) -> Result<FeedPage> {
        let cursor = {
            let view = self.view.read().expect("feed view lock poisoned");
            match view.next_cursor {
                Some(c) => c,
                None => {
                    return Ok(FeedPage {
                        data: Vec::new(),
                        next_cursor: None,
                    })
                }
            }
        };

        let page = self.backend.fetch_page(cursor, self.page_size).await?;

        let mut view = self.view.write().expect("feed view lock poisoned");
        view.posts.extend(page.data.iter().cloned());
        view.next_cursor = page.next_cursor;
        view.pages_loaded = cursor + 1;
        debug!(cursor, fetched = page.data.len(), "feed page loaded");
        Ok(page)
    }

    /// Optimistically flips the viewer's like on `post_id`.
    ///
    /// The flipped `is_liked_by_viewer` / `likes_count` land in the local
    /// view before the backend call settles. On failure the pre-mutation
    /// snapshot is restored and the error is returned; on either outcome
    /// the view is re-fetched to reconcile with the source of truth.
    pub async fn toggle_like(&self, post_id: Uuid) -> Result<()> {
        // Phase 1+2: snapshot, then apply locally.
        let mut mutation = {
            let mut view = self.view.write().expect("feed view lock poisoned");
            let post = view
                .posts
                .iter_mut()
                .find(|p| p.id == post_id)
                .ok_or_else(|| Error::NotFound("feed post", post_id.to_string()))?;
            let mutation = OptimisticMutation::applied(post.clone());
            apply_like_toggle(post);
            mutation
        };

        // Phase 3: settle.
        match self.backend.toggle_like(post_id).await {
            Ok(()) => {
                mutation.commit();
                self.reconcile().await;
                Ok(())
            }
            Err(err) => {
                let snapshot = mutation.rollback();
                {
                    let mut view = self.view.write().expect("feed view lock poisoned");
                    if let Some(post) = view.posts.iter_mut().find(|p| p.id == post_id) {
                        *post = snapshot;
                    }
                }
                self.reconcile().await;
                Err(err)
            }
        }
    }

    /// Publishes a new post at the head of the feed and returns it.
    /// A failed call leaves the local view untouched.
    pub async fn create_post(&self, content: &str, image_urls: Vec<String>) -> Result<FeedPost> {
        validate::feed_content(content)?;
        let created = self
            .backend
            .create_post(NewFeedPost {
                content: content.to_string(),
                image_urls,
            })
            .await?;
        {
            // Make sure the head page is covered so the new post shows up.
            let mut view = self.view.write().expect("feed view lock poisoned");
            view.pages_loaded = view.pages_loaded.max(1);
        }
        self.reconcile().await;
        Ok(created)
    }

    /// Deletes one of the viewer's own posts. Deleting somebody else's
    /// post is refused locally, before any backend traffic.
    pub async fn delete_post(&self, post_id: Uuid) -> Result<()> {
        {
            let view = self.view.read().expect("feed view lock poisoned");
            let post = view
                .posts
                .iter()
                .find(|p| p.id == post_id)
                .ok_or_else(|| Error::NotFound("feed post", post_id.to_string()))?;
            if !post.is_author {
                return Err(Error::Forbidden(
                    "only the author may delete a feed post".into(),
                ));
            }
        }
        self.backend.delete_post(post_id).await?;
        self.reconcile().await;
        Ok(())
    }

    /// Rebuilds the local view from the backend, covering the pages that
    /// were loaded before. Best-effort: a fetch failure keeps the current
    /// view and logs, so a rolled-back mutation stays rolled back.
    async fn reconcile(&self) {
        let pages = self
            .view
            .read()
            .expect("feed view lock poisoned")
            .pages_loaded;

        let mut posts = Vec::new();
        let mut next_cursor = Some(0);
        for cursor in 0..pages {
            match self.backend.fetch_page(cursor, self.page_size).await {
                Ok(page) => {
                    posts.extend(page.data);
                    next_cursor = page.next_cursor;
                    if next_cursor.is_none() {
                        break;
                    }
                }
                Err(err) => {
                    warn!(cursor, %err, "feed reconcile fetch failed, keeping local view");
                    return;
                }
            }
        }

        let mut view = self.view.write().expect("feed view lock poisoned");
        view.posts = posts;
        view.next_cursor = next_cursor;
    }
}

fn apply_like_toggle(post: &mut FeedPost) {
    post.is_liked_by_viewer = !post.is_liked_by_viewer;
    post.likes_count += if post.is_liked_by_viewer { 1 } else { -1 };
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domains::FeedAuthor;

    fn sample_post(liked: bool, likes: i64) -> FeedPost {
        FeedPost {
            id: Uuid::now_v7(),
            content: "pão de queijo sensacional".into(),
            author: FeedAuthor {
                id: "user-1".into(),
                name: "Maria Silva".into(),
                avatar_url: None,
            },
            image_urls: Vec::new(),
            created_at: Utc::now(),
            likes_count: likes,
            is_liked_by_viewer: liked,
            comments_count: 0,
            is_author: false,
        }
    }

    #[test]
    fn like_toggle_flips_both_fields() {
        let mut post = sample_post(false, 12);
        apply_like_toggle(&mut post);
        assert!(post.is_liked_by_viewer);
        assert_eq!(post.likes_count, 13);

        apply_like_toggle(&mut post);
        assert!(!post.is_liked_by_viewer);
        assert_eq!(post.likes_count, 12);
    }

    #[test]
    fn mutation_rollback_returns_snapshot() {
        let post = sample_post(true, 5);
        let mut mutation = OptimisticMutation::applied(post.clone());
        assert_eq!(mutation.phase(), MutationPhase::Applied);

        let restored = mutation.rollback();
        assert_eq!(restored, post);
        assert_eq!(mutation.phase(), MutationPhase::RolledBack);
    }

    #[test]
    fn mutation_commit_settles() {
        let mut mutation = OptimisticMutation::applied(sample_post(false, 0));
        mutation.commit();
        assert_eq!(mutation.phase(), MutationPhase::Committed);
    }
}
