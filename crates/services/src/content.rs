//! The authoritative in-memory content store for a session.
//!
//! Holds the board, alert, chat, favorite and directory collections and
//! broadcasts updates to subscribers (the view layer). Constructed once at
//! application start and handed to consumers by `Arc`; it is never torn
//! down during the process lifetime.
//!
//! Collections are expected to stay small (tens to low hundreds of records
//! in a single neighborhood), so every query is a plain O(n) scan with no
//! indexing.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;
use domains::{
    Alert, AlertKind, Business, BusinessCategory, BusinessStatus, Conversation, DirectoryEntry,
    Error, Favorite, ItemKind, Message, Post, PostKind, Result, SlotStore,
};
use tokio::sync::broadcast;
use tracing::{debug, warn};
use uuid::Uuid;

/// Persistence slot for the favorites collection.
pub const FAVORITES_SLOT: &str = "cv_favorites";
/// Persistence slot for the commerce/services directory.
pub const DIRECTORY_SLOT: &str = "cv_directory";

const EVENT_CAPACITY: usize = 64;

/// Store mutations, broadcast to any number of subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    PostCreated(Uuid),
    AlertCreated(Uuid),
    DirectoryEntryAdded(Uuid),
    BusinessStatusChanged { id: Uuid, status: BusinessStatus },
    FavoriteAdded(Uuid),
    FavoriteRemoved(Uuid),
    MessageSent { room: String },
}

#[derive(Debug, Default, Clone)]
pub struct PostFilter {
    pub kind: Option<PostKind>,
    pub search: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct AlertFilter {
    pub kind: Option<AlertKind>,
    pub search: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct DirectoryFilter {
    pub category: Option<BusinessCategory>,
    pub search: Option<String>,
    /// Restrict businesses to `Approved`; service providers have no
    /// moderation lifecycle and always pass.
    pub approved_only: bool,
}

#[derive(Default)]
struct Room {
    conversation: Conversation,
    messages: Vec<Message>,
}

#[derive(Default)]
struct Collections {
    posts: Vec<Post>,
    alerts: Vec<Alert>,
    directory: Vec<DirectoryEntry>,
    favorites: Vec<Favorite>,
    rooms: HashMap<String, Room>,
}

pub struct ContentStore {
    slots: Arc<dyn SlotStore>,
    state: RwLock<Collections>,
    events: broadcast::Sender<StoreEvent>,
}

impl ContentStore {
    pub fn new(slots: Arc<dyn SlotStore>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            slots,
            state: RwLock::new(Collections::default()),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Loads persisted collections from the slot store.
    ///
    /// Missing or unparseable payloads never propagate: favorites fall back
    /// to an empty list, the directory to `default_directory` (which is
    /// persisted so the next startup reads it back).
    pub async fn load(&self, default_directory: Vec<DirectoryEntry>) {
        let favorites = match self.slots.get(FAVORITES_SLOT).await {
            Ok(Some(raw)) => serde_json::from_str::<Vec<Favorite>>(&raw).unwrap_or_else(|err| {
                warn!(slot = FAVORITES_SLOT, %err, "discarding unparseable favorites payload");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(slot = FAVORITES_SLOT, %err, "favorites slot unreadable, starting empty");
                Vec::new()
            }
        };

        let directory = match self.slots.get(DIRECTORY_SLOT).await {
            Ok(Some(raw)) => serde_json::from_str::<Vec<DirectoryEntry>>(&raw).ok(),
            Ok(None) => None,
            Err(err) => {
                warn!(slot = DIRECTORY_SLOT, %err, "directory slot unreadable");
                None
            }
        };
        let (directory, seeded) = match directory {
            Some(entries) => (entries, false),
            None => (default_directory, true),
        };

        debug!(
            favorites = favorites.len(),
            directory = directory.len(),
            seeded,
            "content store loaded"
        );

        {
            let mut state = self.state.write().expect("content store lock poisoned");
            state.favorites = favorites;
            state.directory = directory;
        }
        if seeded {
            self.persist_directory().await;
        }
    }

    // ── Posts & alerts ──────────────────────────────────────────────────

    /// Prepends a fully-formed post; newest-first by convention. The caller
    /// is responsible for any validation.
    pub fn create_post(&self, post: Post) {
        let id = post.id;
        self.state
            .write()
            .expect("content store lock poisoned")
            .posts
            .insert(0, post);
        let _ = self.events.send(StoreEvent::PostCreated(id));
    }

    pub fn create_alert(&self, alert: Alert) {
        let id = alert.id;
        self.state
            .write()
            .expect("content store lock poisoned")
            .alerts
            .insert(0, alert);
        let _ = self.events.send(StoreEvent::AlertCreated(id));
    }

    pub fn posts(&self, filter: &PostFilter) -> Vec<Post> {
        let state = self.state.read().expect("content store lock poisoned");
        state
            .posts
            .iter()
            .filter(|p| filter.kind.is_none_or(|k| p.kind == k))
            .filter(|p| {
                matches_search(
                    filter.search.as_deref(),
                    [p.title.as_str(), p.desc.as_str(), p.author.as_str()],
                )
            })
            .cloned()
            .collect()
    }

    pub fn alerts(&self, filter: &AlertFilter) -> Vec<Alert> {
        let state = self.state.read().expect("content store lock poisoned");
        state
            .alerts
            .iter()
            .filter(|a| filter.kind.is_none_or(|k| a.kind == k))
            .filter(|a| {
                matches_search(
                    filter.search.as_deref(),
                    [a.title.as_str(), a.desc.as_str(), a.author.as_str()],
                )
            })
            .cloned()
            .collect()
    }

    // ── Directory ───────────────────────────────────────────────────────

    /// Adds a directory listing. Submitted businesses always enter the
    /// moderation queue as `Pending`, whatever the caller filled in.
    pub async fn add_directory_entry(&self, mut entry: DirectoryEntry) {
        if let DirectoryEntry::Business(ref mut b) = entry {
            b.status = BusinessStatus::Pending;
            b.updated_at = Utc::now();
        }
        let id = entry.id();
        self.state
            .write()
            .expect("content store lock poisoned")
            .directory
            .insert(0, entry);
        let _ = self.events.send(StoreEvent::DirectoryEntryAdded(id));
        self.persist_directory().await;
    }

    pub fn directory(&self, filter: &DirectoryFilter) -> Vec<DirectoryEntry> {
        let state = self.state.read().expect("content store lock poisoned");
        state
            .directory
            .iter()
            .filter(|e| match (filter.category, e) {
                (None, _) => true,
                (Some(cat), DirectoryEntry::Business(b)) => b.category == cat,
                (Some(_), DirectoryEntry::ServiceProvider(_)) => false,
            })
            .filter(|e| match e {
                DirectoryEntry::Business(b) => {
                    !filter.approved_only || b.status == BusinessStatus::Approved
                }
                DirectoryEntry::ServiceProvider(_) => true,
            })
            .filter(|e| {
                matches_search(
                    filter.search.as_deref(),
                    [e.name(), e.description(), e.bairro()],
                )
            })
            .cloned()
            .collect()
    }

    /// Transitions a business's lifecycle field and bumps `updated_at`.
    ///
    /// No transition table: `Rejected -> Approved` is accepted just like
    /// `Pending -> Approved`.
    pub async fn update_business_status(&self, id: Uuid, status: BusinessStatus) -> Result<Business> {
        let updated = {
            let mut state = self.state.write().expect("content store lock poisoned");
            let business = state
                .directory
                .iter_mut()
                .find_map(|entry| match entry {
                    DirectoryEntry::Business(b) if b.id == id => Some(b),
                    _ => None,
                })
                .ok_or_else(|| Error::NotFound("business", id.to_string()))?;
            business.status = status;
            business.updated_at = Utc::now();
            business.clone()
        };
        let _ = self
            .events
            .send(StoreEvent::BusinessStatusChanged { id, status });
        self.persist_directory().await;
        Ok(updated)
    }

    // ── Favorites ───────────────────────────────────────────────────────

    /// Removes the favorite matching `(item_id, item_kind)` if present,
    /// inserts one otherwise. The existence check makes a rapid double-call
    /// land back on the original membership state.
    ///
    /// Returns `true` when the item is a favorite after the call.
    pub async fn toggle_favorite(
        &self,
        user_id: &str,
        item_id: Uuid,
        item_kind: ItemKind,
        title: &str,
    ) -> bool {
        let (now_favorite, event) = {
            let mut state = self.state.write().expect("content store lock poisoned");
            match state
                .favorites
                .iter()
                .position(|f| f.item_id == item_id && f.item_kind == item_kind)
            {
                Some(idx) => {
                    let removed = state.favorites.remove(idx);
                    (false, StoreEvent::FavoriteRemoved(removed.id))
                }
                None => {
                    let favorite = Favorite {
                        id: Uuid::now_v7(),
                        user_id: user_id.to_string(),
                        item_id,
                        item_kind,
                        title: title.to_string(),
                        created_at: Utc::now(),
                    };
                    let event = StoreEvent::FavoriteAdded(favorite.id);
                    state.favorites.insert(0, favorite);
                    (true, event)
                }
            }
        };
        let _ = self.events.send(event);
        self.persist_favorites().await;
        now_favorite
    }

    pub fn is_favorite(&self, item_id: Uuid) -> bool {
        let state = self.state.read().expect("content store lock poisoned");
        state.favorites.iter().any(|f| f.item_id == item_id)
    }

    pub fn favorites(&self) -> Vec<Favorite> {
        self.state
            .read()
            .expect("content store lock poisoned")
            .favorites
            .clone()
    }

    // ── Chat ────────────────────────────────────────────────────────────

    /// Appends to a room's message log (oldest-first, unlike the boards)
    /// and updates the room's conversation bookkeeping.
    pub fn send_message(&self, room: &str, participant_name: &str, message: Message) {
        {
            let mut state = self.state.write().expect("content store lock poisoned");
            let entry = state.rooms.entry(room.to_string()).or_insert_with(|| Room {
                conversation: Conversation {
                    id: room.to_string(),
                    participant_name: participant_name.to_string(),
                    last_message: None,
                    unread_count: 0,
                },
                messages: Vec::new(),
            });
            entry.conversation.last_message = Some(message.text.clone());
            entry.conversation.unread_count += 1;
            entry.messages.push(message);
        }
        let _ = self.events.send(StoreEvent::MessageSent {
            room: room.to_string(),
        });
    }

    pub fn messages(&self, room: &str) -> Vec<Message> {
        let state = self.state.read().expect("content store lock poisoned");
        state
            .rooms
            .get(room)
            .map(|r| r.messages.clone())
            .unwrap_or_default()
    }

    pub fn conversations(&self) -> Vec<Conversation> {
        let state = self.state.read().expect("content store lock poisoned");
        state.rooms.values().map(|r| r.conversation.clone()).collect()
    }

    // ── Persistence ─────────────────────────────────────────────────────

    // Write failures are logged and swallowed: persistence is best-effort
    // and the in-memory state stays authoritative for the session.

    async fn persist_favorites(&self) {
        let payload = {
            let state = self.state.read().expect("content store lock poisoned");
            serde_json::to_string(&state.favorites)
        };
        self.write_slot(FAVORITES_SLOT, payload).await;
    }

    async fn persist_directory(&self) {
        let payload = {
            let state = self.state.read().expect("content store lock poisoned");
            serde_json::to_string(&state.directory)
        };
        self.write_slot(DIRECTORY_SLOT, payload).await;
    }

    async fn write_slot(&self, slot: &str, payload: serde_json::Result<String>) {
        match payload {
            Ok(json) => {
                if let Err(err) = self.slots.put(slot, &json).await {
                    warn!(slot, %err, "failed to persist collection");
                }
            }
            Err(err) => warn!(slot, %err, "failed to serialize collection"),
        }
    }
}

fn matches_search<'a>(needle: Option<&str>, haystacks: impl IntoIterator<Item = &'a str>) -> bool {
    match needle {
        None => true,
        Some(q) if q.is_empty() => true,
        Some(q) => {
            let q = q.to_lowercase();
            haystacks
                .into_iter()
                .any(|h| h.to_lowercase().contains(&q))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::MockSlotStore;

    fn store_with_quiet_slots() -> ContentStore {
        let mut slots = MockSlotStore::new();
        slots.expect_get().returning(|_| Ok(None));
        slots.expect_put().returning(|_, _| Ok(()));
        ContentStore::new(Arc::new(slots))
    }

    fn sample_post(title: &str, kind: PostKind) -> Post {
        Post {
            id: Uuid::now_v7(),
            title: title.into(),
            desc: "desc".into(),
            author: "Vizinho".into(),
            kind,
            image: None,
            coordinates: None,
            business_id: None,
            service_provider_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn created_post_lands_at_index_zero() {
        let store = store_with_quiet_slots();
        store.create_post(sample_post("first", PostKind::Comercio));
        store.create_post(sample_post("second", PostKind::Vaga));

        let posts = store.posts(&PostFilter::default());
        assert_eq!(posts[0].title, "second");
        assert_eq!(posts[1].title, "first");
    }

    #[test]
    fn post_filter_matches_kind_and_substring() {
        let store = store_with_quiet_slots();
        store.create_post(sample_post("Pães Artesanais - 20% OFF", PostKind::Promocao));
        store.create_post(sample_post("Balconista de Padaria", PostKind::Vaga));

        let promos = store.posts(&PostFilter {
            kind: Some(PostKind::Promocao),
            search: None,
        });
        assert_eq!(promos.len(), 1);

        let padaria = store.posts(&PostFilter {
            kind: None,
            search: Some("padaria".into()),
        });
        assert_eq!(padaria.len(), 1);
        assert_eq!(padaria[0].kind, PostKind::Vaga);
    }

    #[tokio::test]
    async fn double_toggle_returns_to_original_membership() {
        let store = store_with_quiet_slots();
        let item = Uuid::now_v7();

        assert!(
            store
                .toggle_favorite("u1", item, ItemKind::Post, "Eletricista")
                .await
        );
        assert!(store.is_favorite(item));

        assert!(
            !store
                .toggle_favorite("u1", item, ItemKind::Post, "Eletricista")
                .await
        );
        assert!(!store.is_favorite(item));
        assert!(store.favorites().is_empty());
    }

    #[test]
    fn chat_append_updates_conversation() {
        let store = store_with_quiet_slots();
        let msg = Message {
            id: Uuid::now_v7(),
            text: "Alguém recomenda um encanador?".into(),
            author: "Pedro M.".into(),
            sent_at: Utc::now(),
        };
        store.send_message("geral", "Pedro M.", msg);

        let convos = store.conversations();
        assert_eq!(convos.len(), 1);
        assert_eq!(
            convos[0].last_message.as_deref(),
            Some("Alguém recomenda um encanador?")
        );
        assert_eq!(convos[0].unread_count, 1);
        assert_eq!(store.messages("geral").len(), 1);
    }
}
