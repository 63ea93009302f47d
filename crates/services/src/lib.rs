//! Application services for Conecta Vila: the session content store, the
//! paginated feed client, notification bookkeeping, and input validation.

pub mod content;
pub mod feed;
pub mod notifications;
pub mod validate;

pub use content::{
    AlertFilter, ContentStore, DirectoryFilter, PostFilter, StoreEvent, DIRECTORY_SLOT,
    FAVORITES_SLOT,
};
pub use feed::{FeedClient, MutationPhase};
pub use notifications::{spawn_timer, NotificationCenter};
