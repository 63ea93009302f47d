//! In-app notification bookkeeping.
//!
//! Notifications arrive from simulated background events (a delayed timer,
//! not a real push mechanism) and live in memory only; they are lost on
//! restart by design.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::Utc;
use domains::{Notification, NotificationKind};
use tokio::task::JoinHandle;
use tracing::info;
use uuid::Uuid;

pub struct NotificationCenter {
    inner: RwLock<Vec<Notification>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Vec::new()),
        }
    }

    /// Prepends a notification and returns it.
    pub fn push(&self, title: &str, message: &str, kind: NotificationKind) -> Notification {
        let notification = Notification {
            id: Uuid::now_v7(),
            title: title.to_string(),
            message: message.to_string(),
            created_at: Utc::now(),
            read: false,
            kind,
        };
        self.inner
            .write()
            .expect("notification lock poisoned")
            .insert(0, notification.clone());
        notification
    }

    /// Flips one notification's `read` flag. Unknown ids are ignored;
    /// returns whether one was found.
    pub fn mark_as_read(&self, id: Uuid) -> bool {
        let mut inner = self.inner.write().expect("notification lock poisoned");
        match inner.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                n.read = true;
                true
            }
            None => false,
        }
    }

    pub fn clear_all(&self) {
        self.inner
            .write()
            .expect("notification lock poisoned")
            .clear();
    }

    pub fn unread_count(&self) -> usize {
        self.inner
            .read()
            .expect("notification lock poisoned")
            .iter()
            .filter(|n| !n.read)
            .count()
    }

    pub fn list(&self) -> Vec<Notification> {
        self.inner
            .read()
            .expect("notification lock poisoned")
            .clone()
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawns the simulated background event: after `delay`, a system
/// notification lands, but only when a user session exists.
pub fn spawn_timer(
    center: Arc<NotificationCenter>,
    delay: Duration,
    current_user: Option<String>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let Some(user) = current_user else {
            return;
        };
        let notification = center.push(
            "Novo Evento Próximo",
            "A 'Feira de Trocas' começa em 1 hora na Praça Central.",
            NotificationKind::System,
        );
        info!(%user, id = %notification.id, "simulated notification delivered");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_as_read_flips_one_flag() {
        let center = NotificationCenter::new();
        let a = center.push("a", "first", NotificationKind::System);
        let b = center.push("b", "second", NotificationKind::Alert);

        assert_eq!(center.unread_count(), 2);
        assert!(center.mark_as_read(a.id));
        assert_eq!(center.unread_count(), 1);

        let list = center.list();
        assert!(list.iter().find(|n| n.id == a.id).unwrap().read);
        assert!(!list.iter().find(|n| n.id == b.id).unwrap().read);
    }

    #[test]
    fn mark_as_read_ignores_unknown_id() {
        let center = NotificationCenter::new();
        assert!(!center.mark_as_read(Uuid::now_v7()));
    }

    #[test]
    fn clear_all_empties_the_collection() {
        let center = NotificationCenter::new();
        center.push("a", "first", NotificationKind::Post);
        center.clear_all();
        assert!(center.list().is_empty());
        assert_eq!(center.unread_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn timer_only_fires_with_a_session() {
        let center = Arc::new(NotificationCenter::new());

        let anonymous = spawn_timer(Arc::clone(&center), Duration::from_secs(10), None);
        anonymous.await.unwrap();
        assert!(center.list().is_empty());

        let logged_in = spawn_timer(
            Arc::clone(&center),
            Duration::from_secs(10),
            Some("Maria".into()),
        );
        logged_in.await.unwrap();
        assert_eq!(center.unread_count(), 1);
        assert_eq!(center.list()[0].kind, NotificationKind::System);
    }
}
