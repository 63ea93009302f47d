//! # Domain Models
//!
//! Core record types held by the community content store. Every record
//! carries a UUID v7 id, unique within its collection at creation time and
//! time-ordered for free.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A point inside the neighborhood, used by the map view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// What a classified post advertises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    /// Storefront commerce (markets, bakeries).
    Comercio,
    /// Self-employed neighbors offering services.
    Autonomo,
    /// Time-limited promotions.
    Promocao,
    /// Job openings.
    Vaga,
}

/// A classified post on the neighborhood board.
///
/// Posts are immutable after creation; there is no edit or delete flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub desc: String,
    pub author: String,
    pub kind: PostKind,
    pub image: Option<String>,
    pub coordinates: Option<Coordinates>,
    /// Loose reference into the directory; not enforced against it.
    pub business_id: Option<Uuid>,
    pub service_provider_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Ajuda,
    Pet,
    Seguranca,
}

/// A solidarity or safety alert. Immutable once published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,
    pub title: String,
    pub desc: String,
    pub author: String,
    pub kind: AlertKind,
    /// Photo of the pet or place, when the author attached one.
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Who authored a feed post, as rendered by the social feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedAuthor {
    pub id: String,
    pub name: String,
    pub avatar_url: Option<String>,
}

/// A post on the paginated social feed.
///
/// Unlike board [`Post`]s, feed posts carry viewer-relative state
/// (`is_liked_by_viewer`, `is_author`) and mutate via like toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedPost {
    pub id: Uuid,
    pub content: String,
    pub author: FeedAuthor,
    /// Opaque references; upload/storage is an external collaborator.
    pub image_urls: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub likes_count: i64,
    pub is_liked_by_viewer: bool,
    pub comments_count: i64,
    pub is_author: bool,
}

/// One page of the feed. `next_cursor` being `None` is the sole
/// termination signal for load-more loops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedPage {
    pub data: Vec<FeedPost>,
    pub next_cursor: Option<u64>,
}

/// Submission payload for a new feed post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFeedPost {
    pub content: String,
    pub image_urls: Vec<String>,
}

/// A chat message, append-only per room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub text: String,
    pub author: String,
    pub sent_at: DateTime<Utc>,
}

/// Per-room bookkeeping kept alongside the message log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub participant_name: String,
    pub last_message: Option<String>,
    pub unread_count: u32,
}

/// The collections a record can be favorited from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Post,
    Alert,
    Event,
    Business,
    Service,
}

/// Join-table-like record linking a user to any likeable entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: Uuid,
    pub user_id: String,
    pub item_id: Uuid,
    pub item_kind: ItemKind,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    System,
    Alert,
    Post,
}

/// An in-app notification. Memory-only; lost on restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub read: bool,
    pub kind: NotificationKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessCategory {
    Mercado,
    Padaria,
    Restaurante,
    Farmacia,
    Pet,
    Servico,
    Outros,
}

/// Moderation lifecycle of a directory business.
///
/// Any transition is accepted, including `Rejected -> Approved`; the
/// moderation flow keeps no audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessStatus {
    Pending,
    Approved,
    Rejected,
}

/// A storefront business in the local commerce directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    pub id: Uuid,
    pub name: String,
    pub category: BusinessCategory,
    pub description: String,
    pub address: String,
    pub bairro: String,
    pub coordinates: Option<Coordinates>,
    pub whatsapp: Option<String>,
    pub opening_hours: Option<String>,
    pub delivery: bool,
    pub status: BusinessStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    Diarista,
    Eletricista,
    Encanador,
    AulaParticular,
    CuidadoIdosos,
    PasseadorPets,
    Chaveiro,
    Outros,
}

/// A self-employed neighbor offering services door to door.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceProvider {
    pub id: Uuid,
    pub name: String,
    pub service_kind: ServiceKind,
    pub description: String,
    pub whatsapp: Option<String>,
    pub bairro: String,
    pub radius_km: Option<f64>,
    pub rating: Option<f64>,
    pub reviews_count: u32,
}

/// A directory listing. Businesses and service providers appear together in
/// some views, so the union is an explicit tagged variant rather than two
/// collections duck-typed at the edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "entry", rename_all = "snake_case")]
pub enum DirectoryEntry {
    Business(Business),
    ServiceProvider(ServiceProvider),
}

impl DirectoryEntry {
    pub fn id(&self) -> Uuid {
        match self {
            DirectoryEntry::Business(b) => b.id,
            DirectoryEntry::ServiceProvider(p) => p.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            DirectoryEntry::Business(b) => &b.name,
            DirectoryEntry::ServiceProvider(p) => &p.name,
        }
    }

    pub fn bairro(&self) -> &str {
        match self {
            DirectoryEntry::Business(b) => &b.bairro,
            DirectoryEntry::ServiceProvider(p) => &p.bairro,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            DirectoryEntry::Business(b) => &b.description,
            DirectoryEntry::ServiceProvider(p) => &p.description,
        }
    }

    pub fn as_business(&self) -> Option<&Business> {
        match self {
            DirectoryEntry::Business(b) => Some(b),
            DirectoryEntry::ServiceProvider(_) => None,
        }
    }
}
