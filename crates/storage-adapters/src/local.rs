//! File-backed [`SlotStore`]: one `<slot>.json` file per collection under a
//! root directory. The desktop analogue of the browser's local storage —
//! whole-payload writes, no versioning, no locking.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use domains::{Error, Result, SlotStore};
use tokio::fs;
use tracing::trace;

pub struct FileSlotStore {
    root: PathBuf,
}

impl FileSlotStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        // Slot names are fixed constants chosen by the services layer, not
        // user input, so plain joining is fine.
        self.root.join(format!("{slot}.json"))
    }

    async fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|err| storage_err(&self.root, err))
    }
}

#[async_trait]
impl SlotStore for FileSlotStore {
    async fn get(&self, slot: &str) -> Result<Option<String>> {
        let path = self.slot_path(slot);
        match fs::read_to_string(&path).await {
            Ok(payload) => {
                trace!(slot, bytes = payload.len(), "slot read");
                Ok(Some(payload))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(storage_err(&path, err)),
        }
    }

    async fn put(&self, slot: &str, payload: &str) -> Result<()> {
        self.ensure_root().await?;
        let path = self.slot_path(slot);
        fs::write(&path, payload)
            .await
            .map_err(|err| storage_err(&path, err))
    }

    async fn remove(&self, slot: &str) -> Result<()> {
        let path = self.slot_path(slot);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(storage_err(&path, err)),
        }
    }
}

fn storage_err(path: &Path, err: std::io::Error) -> Error {
    Error::Storage(format!("{}: {err}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_slot_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSlotStore::new(dir.path());
        assert_eq!(store.get("cv_directory").await.unwrap(), None);
    }

    #[tokio::test]
    async fn put_then_get_survives_a_new_store() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileSlotStore::new(dir.path());
            store.put("cv_favorites", r#"[{"ok":true}]"#).await.unwrap();
        }
        let reopened = FileSlotStore::new(dir.path());
        assert_eq!(
            reopened.get("cv_favorites").await.unwrap().as_deref(),
            Some(r#"[{"ok":true}]"#)
        );
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSlotStore::new(dir.path());
        store.put("cv_favorites", "[]").await.unwrap();
        store.remove("cv_favorites").await.unwrap();
        store.remove("cv_favorites").await.unwrap();
        assert_eq!(store.get("cv_favorites").await.unwrap(), None);
    }
}
