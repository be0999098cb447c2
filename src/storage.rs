//! Durable per-session key/value storage, the server-side stand-in for a
//! browser's local storage.
//!
//! Every client session gets its own namespace. [`FileStorage`] keeps one JSON
//! object per session on disk; [`MemoryStorage`] is used by tests.

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{Context, Result, anyhow};
use uuid::Uuid;

pub trait LocalStorage: Send + Sync {
    fn get_item(&self, session: Uuid, key: &str) -> Result<Option<String>>;
    fn set_item(&self, session: Uuid, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, session: Uuid, key: &str) -> Result<()>;
}

pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create storage directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, session: Uuid) -> PathBuf {
        self.dir.join(format!("{session}.json"))
    }

    fn read_all(&self, session: Uuid) -> Result<BTreeMap<String, String>> {
        let path = self.path_for(session);
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("Corrupt storage file {}", path.display()))
    }

    fn write_all(&self, session: Uuid, entries: &BTreeMap<String, String>) -> Result<()> {
        let path = self.path_for(session);
        if entries.is_empty() {
            if path.exists() {
                fs::remove_file(&path)
                    .with_context(|| format!("Failed to remove {}", path.display()))?;
            }
            return Ok(());
        }
        let raw = serde_json::to_string_pretty(entries).context("Failed to serialize storage")?;
        fs::write(&path, raw).with_context(|| format!("Failed to write {}", path.display()))
    }
}

impl LocalStorage for FileStorage {
    fn get_item(&self, session: Uuid, key: &str) -> Result<Option<String>> {
        Ok(self.read_all(session)?.remove(key))
    }

    fn set_item(&self, session: Uuid, key: &str, value: &str) -> Result<()> {
        // A corrupt file is replaced rather than blocking every later write.
        let mut entries = self.read_all(session).unwrap_or_default();
        entries.insert(key.to_owned(), value.to_owned());
        self.write_all(session, &entries)
    }

    fn remove_item(&self, session: Uuid, key: &str) -> Result<()> {
        let mut entries = self.read_all(session).unwrap_or_default();
        entries.remove(key);
        self.write_all(session, &entries)
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<(Uuid, String), String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, session: Uuid, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().map_err(|_| anyhow!("storage lock poisoned"))?;
        Ok(entries.get(&(session, key.to_owned())).cloned())
    }

    fn set_item(&self, session: Uuid, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| anyhow!("storage lock poisoned"))?;
        entries.insert((session, key.to_owned()), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, session: Uuid, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| anyhow!("storage lock poisoned"))?;
        entries.remove(&(session, key.to_owned()));
        Ok(())
    }
}
