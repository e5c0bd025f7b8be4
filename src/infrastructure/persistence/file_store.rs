//! Durable store backed by a single JSON file.
//!
//! # File Layout
//!
//! ```json
//! {"version":"v1","item":{"327c3fda87":"https://example.com"}}
//! ```
//!
//! The file is the authoritative copy. Nothing is cached between calls:
//! every operation reads and deserializes the whole document, and `add` /
//! `remove` serialize it back. All operations run under one async mutex so
//! two requests can never interleave their read-modify-write cycles.
//!
//! Writes go to a sibling `*.tmp` file that is then renamed over the
//! original, so a crash mid-write leaves the previous document intact.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::entities::Entry;
use crate::domain::repositories::{AliasStore, StoreError, StoreResult};

/// Schema marker written into newly created files.
pub const SCHEMA_VERSION: &str = "v1";

/// On-disk document.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    version: String,
    #[serde(default)]
    item: BTreeMap<String, String>,
}

impl StoreDocument {
    fn empty() -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            item: BTreeMap::new(),
        }
    }
}

/// File-backed implementation of [`AliasStore`].
#[derive(Debug)]
pub struct FileAliasStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileAliasStore {
    /// Opens the store at `path`, creating an empty `v1` document if the
    /// file does not exist.
    ///
    /// An existing file is trusted as-is: its content is not validated here
    /// and no migration is attempted. A malformed file surfaces as
    /// [`StoreError::Corrupt`] on the first operation.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file cannot be checked or created.
    pub async fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        };

        if !fs::try_exists(&store.path).await? {
            store.persist(&StoreDocument::empty()).await?;
            info!(path = %store.path.display(), "Created empty store file");
        } else {
            debug!(path = %store.path.display(), "Using existing store file");
        }

        Ok(store)
    }

    /// Opens the store at `path` without creating it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] with [`io::ErrorKind::NotFound`] if the
    /// file does not exist.
    pub async fn open_existing(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();

        if !fs::try_exists(&path).await? {
            return Err(StoreError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("store file {} does not exist", path.display()),
            )));
        }

        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns every entry, ordered by code.
    pub async fn entries(&self) -> StoreResult<Vec<Entry>> {
        let _guard = self.lock.lock().await;
        let doc = self.load().await?;
        Ok(doc
            .item
            .into_iter()
            .map(|(code, target)| Entry::new(code, target))
            .collect())
    }

    /// Returns the schema marker stored in the file.
    pub async fn version(&self) -> StoreResult<String> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.version)
    }

    async fn load(&self) -> StoreResult<StoreDocument> {
        let raw = fs::read(&self.path).await?;
        let doc: StoreDocument = serde_json::from_slice(&raw)?;
        Ok(doc)
    }

    async fn persist(&self, doc: &StoreDocument) -> StoreResult<()> {
        let raw = serde_json::to_vec(doc)?;
        let tmp = self.tmp_path();
        fs::write(&tmp, raw).await?;

        if let Err(e) = fs::rename(&tmp, &self.path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name: OsString = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[async_trait]
impl AliasStore for FileAliasStore {
    async fn add(&self, code: &str, target: &str) -> StoreResult<()> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;

        if doc.item.contains_key(code) {
            return Err(StoreError::AlreadyExists(code.to_owned()));
        }

        doc.item.insert(code.to_owned(), target.to_owned());
        self.persist(&doc).await?;

        debug!(code, target, version = %doc.version, "Entry added");
        Ok(())
    }

    async fn remove(&self, code: &str) -> StoreResult<()> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;

        if doc.item.remove(code).is_none() {
            return Err(StoreError::NotFound(code.to_owned()));
        }

        self.persist(&doc).await?;

        debug!(code, "Entry removed");
        Ok(())
    }

    async fn get(&self, code: &str) -> StoreResult<String> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;

        doc.item
            .remove(code)
            .ok_or_else(|| StoreError::NotFound(code.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn open_in(dir: &TempDir) -> FileAliasStore {
        FileAliasStore::open(dir.path().join("Data.json"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_open_creates_versioned_empty_file() {
        let dir = TempDir::new().unwrap();
        let store = open_in(&dir).await;

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(json["version"], "v1");
        assert!(json["item"].as_object().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_open_keeps_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Data.json");
        std::fs::write(&path, r#"{"version":"v0","item":{"abc":"https://example.com"}}"#).unwrap();

        let store = FileAliasStore::open(&path).await.unwrap();

        assert_eq!(store.version().await.unwrap(), "v0");
        assert_eq!(store.get("abc").await.unwrap(), "https://example.com");
    }

    #[tokio::test]
    async fn test_add_get_remove() {
        let dir = TempDir::new().unwrap();
        let store = open_in(&dir).await;

        store.add("abc", "https://example.com").await.unwrap();
        assert_eq!(store.get("abc").await.unwrap(), "https://example.com");

        store.remove("abc").await.unwrap();
        assert!(matches!(store.get("abc").await, Err(StoreError::NotFound(_))));
        assert!(matches!(
            store.remove("abc").await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_add_duplicate_code_fails() {
        let dir = TempDir::new().unwrap();
        let store = open_in(&dir).await;

        store.add("abc", "https://example.com").await.unwrap();
        let result = store.add("abc", "https://other.com").await;

        assert!(matches!(result, Err(StoreError::AlreadyExists(_))));
        assert_eq!(store.get("abc").await.unwrap(), "https://example.com");
    }

    #[tokio::test]
    async fn test_malformed_file_is_corrupt_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Data.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = FileAliasStore::open(&path).await.unwrap();

        assert!(matches!(store.get("abc").await, Err(StoreError::Corrupt(_))));
        assert!(matches!(
            store.add("abc", "https://example.com").await,
            Err(StoreError::Corrupt(_))
        ));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[tokio::test]
    async fn test_deleted_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let store = open_in(&dir).await;
        std::fs::remove_file(store.path()).unwrap();

        assert!(matches!(store.get("abc").await, Err(StoreError::Io(_))));
    }

    #[tokio::test]
    async fn test_entries_sorted_by_code() {
        let dir = TempDir::new().unwrap();
        let store = open_in(&dir).await;

        store.add("bbb", "https://b.test").await.unwrap();
        store.add("aaa", "https://a.test").await.unwrap();

        let entries = store.entries().await.unwrap();
        assert_eq!(
            entries,
            vec![
                Entry::new("aaa", "https://a.test"),
                Entry::new("bbb", "https://b.test"),
            ]
        );
    }

    #[tokio::test]
    async fn test_no_tmp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let store = open_in(&dir).await;
        store.add("abc", "https://example.com").await.unwrap();

        assert!(!store.tmp_path().exists());
    }

    #[tokio::test]
    async fn test_open_existing_does_not_create_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.json");

        let result = FileAliasStore::open_existing(&path).await;

        assert!(matches!(
            result,
            Err(StoreError::Io(ref e)) if e.kind() == io::ErrorKind::NotFound
        ));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_open_existing_reads_file() {
        let dir = TempDir::new().unwrap();
        open_in(&dir).await.add("abc", "https://example.com").await.unwrap();

        let store = FileAliasStore::open_existing(dir.path().join("Data.json"))
            .await
            .unwrap();

        assert_eq!(store.get("abc").await.unwrap(), "https://example.com");
    }

    #[tokio::test]
    async fn test_failed_rename_removes_tmp_file() {
        let dir = TempDir::new().unwrap();
        // A non-empty directory at the store path makes the rename fail.
        let path = dir.path().join("Data.json");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("occupied"), "x").unwrap();

        let store = FileAliasStore {
            path,
            lock: Mutex::new(()),
        };

        let result = store.persist(&StoreDocument::empty()).await;

        assert!(matches!(result, Err(StoreError::Io(_))));
        assert!(!store.tmp_path().exists());
    }
}
