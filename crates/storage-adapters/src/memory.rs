//! In-memory [`SlotStore`], used by tests and ephemeral runs.

use async_trait::async_trait;
use dashmap::DashMap;
use domains::{Result, SlotStore};

#[derive(Default)]
pub struct MemorySlotStore {
    slots: DashMap<String, String>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SlotStore for MemorySlotStore {
    async fn get(&self, slot: &str) -> Result<Option<String>> {
        Ok(self.slots.get(slot).map(|v| v.clone()))
    }

    async fn put(&self, slot: &str, payload: &str) -> Result<()> {
        self.slots.insert(slot.to_string(), payload.to_string());
        Ok(())
    }

    async fn remove(&self, slot: &str) -> Result<()> {
        self.slots.remove(slot);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn slot_round_trip() {
        let store = MemorySlotStore::new();
        assert_eq!(store.get("cv_favorites").await.unwrap(), None);

        store.put("cv_favorites", "[]").await.unwrap();
        assert_eq!(store.get("cv_favorites").await.unwrap().as_deref(), Some("[]"));

        store.remove("cv_favorites").await.unwrap();
        assert_eq!(store.get("cv_favorites").await.unwrap(), None);
    }
}
