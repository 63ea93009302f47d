//! Contracts between the services and their ports, checked against mocks.

use std::sync::Arc;

use domains::{Error, Favorite, FeedPage, MockFeedBackend, MockSlotStore};
use integration_tests::{feed_post, PAGE_SIZE};
use services::{ContentStore, FeedClient, DIRECTORY_SLOT, FAVORITES_SLOT};
use uuid::Uuid;

#[tokio::test]
async fn toggle_favorite_writes_the_whole_collection() {
    let mut slots = MockSlotStore::new();
    slots
        .expect_put()
        .withf(|slot, payload| {
            slot == FAVORITES_SLOT
                && serde_json::from_str::<Vec<Favorite>>(payload)
                    .map(|favorites| favorites.len() == 1)
                    .unwrap_or(false)
        })
        .times(1)
        .returning(|_, _| Ok(()));

    let store = ContentStore::new(Arc::new(slots));
    store
        .toggle_favorite("u1", Uuid::now_v7(), domains::ItemKind::Alert, "Gato")
        .await;
}

#[tokio::test]
async fn load_tolerates_an_unreadable_slot_store() {
    let mut slots = MockSlotStore::new();
    slots
        .expect_get()
        .returning(|slot| Err(Error::Storage(format!("{slot}: disk on fire"))));
    // Seeding the directory fallback still attempts one write.
    slots
        .expect_put()
        .withf(|slot, _| slot == DIRECTORY_SLOT)
        .returning(|_, _| Ok(()));

    let store = ContentStore::new(Arc::new(slots));
    store.load(Vec::new()).await;

    assert!(store.favorites().is_empty());
}

#[tokio::test]
async fn rolled_back_like_reconciles_against_the_backend() {
    let post = feed_post(0, 7, false);
    let post_id = post.id;

    let mut backend = MockFeedBackend::new();
    // Initial page load plus the post-rollback reconcile fetch.
    let served = post.clone();
    backend
        .expect_fetch_page()
        .withf(|cursor, limit| *cursor == 0 && *limit == PAGE_SIZE)
        .times(2)
        .returning(move |_, _| {
            Ok(FeedPage {
                data: vec![served.clone()],
                next_cursor: None,
            })
        });
    backend
        .expect_toggle_like()
        .times(1)
        .returning(|id| Err(Error::Transport(format!("post {id}: connection reset"))));

    let client = FeedClient::new(Arc::new(backend), PAGE_SIZE);
    client.next_page().await.unwrap();

    let err = client.toggle_like(post_id).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));

    let after = &client.posts()[0];
    assert_eq!(after.likes_count, 7);
    assert!(!after.is_liked_by_viewer);
}
