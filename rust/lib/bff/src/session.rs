//! Persisted login session.
//!
//! The session is a JSON object stored under [`SESSION_KEY`] in a
//! key/value [`SessionStorage`]. Browsers back this with local storage;
//! the CLI uses [`FileStorage`].

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use clover_client::{ApiError, TokenSource};
use serde::{Deserialize, Serialize};

use crate::error::{BffError, Result};

pub const SESSION_KEY: &str = "userLogin";

/// What login leaves behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub token_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// String key/value persistence.
pub trait SessionStorage: Send + Sync + 'static {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Read and decode the stored session, if any.
pub fn load_session(storage: &dyn SessionStorage) -> Result<Option<SessionData>> {
    match storage.get(SESSION_KEY)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| BffError::Session(format!("decode {}: {}", SESSION_KEY, e))),
        None => Ok(None),
    }
}

pub fn save_session(storage: &dyn SessionStorage, data: &SessionData) -> Result<()> {
    let raw = serde_json::to_string(data).map_err(|e| BffError::Session(e.to_string()))?;
    storage.set(SESSION_KEY, &raw)
}

// ── MemoryStorage ───────────────────────────────────────────────────

/// In-process storage. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

// ── FileStorage ─────────────────────────────────────────────────────

/// A JSON object on disk, rewritten whole on every change.
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| BffError::Session(format!("read {}: {}", self.path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| BffError::Session(format!("parse {}: {}", self.path.display(), e)))
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| BffError::Session(format!("create {}: {}", parent.display(), e)))?;
        }
        let content =
            serde_json::to_string_pretty(map).map_err(|e| BffError::Session(e.to_string()))?;
        std::fs::write(&self.path, content)
            .map_err(|e| BffError::Session(format!("write {}: {}", self.path.display(), e)))
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().unwrap();
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock().unwrap();
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock().unwrap();
        let mut map = self.read_map()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

// ── SessionToken ────────────────────────────────────────────────────

/// Bearer token read from the stored session on every request, so a
/// login or logout takes effect without rebuilding the client.
pub struct SessionToken {
    storage: Arc<dyn SessionStorage>,
}

impl SessionToken {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }
}

#[async_trait::async_trait]
impl TokenSource for SessionToken {
    async fn token(&self) -> std::result::Result<Option<String>, ApiError> {
        load_session(self.storage.as_ref())
            .map(|s| s.map(|s| s.token_id))
            .map_err(|e| ApiError::Auth(e.to_string()))
    }
}
