//! Content store behavior across persistence boundaries.

use domains::{BusinessStatus, DirectoryEntry, Error, ItemKind, PostKind, SlotStore};
use integration_tests::{board_post, fresh_store, store_over};
use services::{DirectoryFilter, PostFilter, StoreEvent, FAVORITES_SLOT};
use storage_adapters::seed;
use uuid::Uuid;

#[tokio::test]
async fn create_prepends_newest_first() {
    let (_, store) = fresh_store();
    store.create_post(board_post("primeiro", PostKind::Comercio));
    store.create_post(board_post("segundo", PostKind::Promocao));
    store.create_post(board_post("terceiro", PostKind::Vaga));

    let titles: Vec<String> = store
        .posts(&PostFilter::default())
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(titles, ["terceiro", "segundo", "primeiro"]);
}

#[tokio::test]
async fn favorites_survive_a_restart() {
    let (slots, store) = fresh_store();
    store.load(Vec::new()).await;

    let item = Uuid::now_v7();
    store
        .toggle_favorite("u1", item, ItemKind::Business, "Padaria do Zé")
        .await;

    // "Restart": a second store over the same slot store.
    let reopened = store_over(slots);
    reopened.load(Vec::new()).await;
    assert!(reopened.is_favorite(item));
    assert_eq!(reopened.favorites()[0].title, "Padaria do Zé");
}

#[tokio::test]
async fn corrupt_favorites_payload_loads_as_empty() {
    let (slots, store) = fresh_store();
    slots
        .put(FAVORITES_SLOT, "{not valid json at all")
        .await
        .unwrap();

    store.load(Vec::new()).await;
    assert!(store.favorites().is_empty());
}

#[tokio::test]
async fn double_toggle_is_a_no_op() {
    let (_, store) = fresh_store();
    let item = Uuid::now_v7();

    store.toggle_favorite("u1", item, ItemKind::Post, "t").await;
    store.toggle_favorite("u1", item, ItemKind::Post, "t").await;

    assert!(!store.is_favorite(item));
    assert!(store.favorites().is_empty());
}

#[tokio::test]
async fn rejected_business_can_still_be_approved() {
    let (_, store) = fresh_store();
    store.load(seed::neighborhood().directory).await;

    let business_id = store
        .directory(&DirectoryFilter::default())
        .iter()
        .find_map(|e| e.as_business().map(|b| b.id))
        .expect("seed contains a business");

    store
        .update_business_status(business_id, BusinessStatus::Rejected)
        .await
        .unwrap();
    let updated = store
        .update_business_status(business_id, BusinessStatus::Approved)
        .await
        .unwrap();

    // No transition table: Rejected -> Approved is accepted.
    assert_eq!(updated.status, BusinessStatus::Approved);
}

#[tokio::test]
async fn status_update_on_unknown_business_is_not_found() {
    let (_, store) = fresh_store();
    store.load(Vec::new()).await;

    let err = store
        .update_business_status(Uuid::now_v7(), BusinessStatus::Approved)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound("business", _)));
}

#[tokio::test]
async fn approved_only_filter_keeps_providers() {
    let (_, store) = fresh_store();
    let seed_data = seed::neighborhood();
    let provider_count = seed_data
        .directory
        .iter()
        .filter(|e| matches!(e, DirectoryEntry::ServiceProvider(_)))
        .count();
    store.load(seed_data.directory).await;

    let business_id = store
        .directory(&DirectoryFilter::default())
        .iter()
        .find_map(|e| e.as_business().map(|b| b.id))
        .unwrap();
    store
        .update_business_status(business_id, BusinessStatus::Rejected)
        .await
        .unwrap();

    let listed = store.directory(&DirectoryFilter {
        approved_only: true,
        ..Default::default()
    });
    assert!(listed.iter().all(|e| match e {
        DirectoryEntry::Business(b) => b.status == BusinessStatus::Approved,
        DirectoryEntry::ServiceProvider(_) => true,
    }));
    assert!(
        listed
            .iter()
            .filter(|e| matches!(e, DirectoryEntry::ServiceProvider(_)))
            .count()
            == provider_count
    );
}

#[tokio::test]
async fn subscribers_see_mutations() {
    let (_, store) = fresh_store();
    let mut events = store.subscribe();

    let post = board_post("novo", PostKind::Comercio);
    let post_id = post.id;
    store.create_post(post);

    assert_eq!(events.recv().await.unwrap(), StoreEvent::PostCreated(post_id));
}
