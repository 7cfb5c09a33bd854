//! Flat key-value persistence for the signed-in user and favorite tools.

use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{StudioError, StudioResult};

pub const USER_KEY: &str = "marketGeniusUser";
pub const FAVORITES_KEY: &str = "assistantFavorites";

/// String values by key. Writers do not coordinate; the last write wins.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> StudioResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StudioResult<()>;
    fn remove(&self, key: &str) -> StudioResult<()>;
}

type Entries = BTreeMap<String, String>;

fn lock(entries: &Mutex<Entries>) -> StudioResult<MutexGuard<'_, Entries>> {
    entries
        .lock()
        .map_err(|_| StudioError::Storage("store lock poisoned".to_string()))
}

#[derive(Default)]
pub struct InMemoryStore {
    entries: Mutex<Entries>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> StudioResult<Option<String>> {
        Ok(lock(&self.entries)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StudioResult<()> {
        lock(&self.entries)?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StudioResult<()> {
        lock(&self.entries)?.remove(key);
        Ok(())
    }
}

/// A store kept as one JSON object file, rewritten on every change.
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<Entries>,
}

impl FileStore {
    /// Opens the store at `path`. A missing file is an empty store; a file
    /// that is not a JSON object of strings is an error.
    pub fn open(path: impl Into<PathBuf>) -> StudioResult<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => Entries::new(),
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| {
                StudioError::Storage(format!("{} is not a valid store: {e}", path.display()))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => Entries::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), keys = entries.len(), "opened file store");

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &Entries) -> StudioResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StudioResult<Option<String>> {
        Ok(lock(&self.entries)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StudioResult<()> {
        let mut entries = lock(&self.entries)?;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> StudioResult<()> {
        let mut entries = lock(&self.entries)?;
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
}

/// The signed-in user, kept across restarts.
#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn KeyValueStore>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn login(&self, name: &str, email: &str) -> StudioResult<User> {
        let user = User {
            name: name.to_string(),
            email: email.to_string(),
        };
        self.store.set(USER_KEY, &serde_json::to_string(&user)?)?;
        Ok(user)
    }

    /// The stored user. An unreadable entry is dropped and reads as signed out.
    pub fn current(&self) -> StudioResult<Option<User>> {
        let Some(raw) = self.store.get(USER_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(error) => {
                warn!(%error, "discarding unreadable stored user");
                self.store.remove(USER_KEY)?;
                Ok(None)
            }
        }
    }

    pub fn logout(&self) -> StudioResult<()> {
        self.store.remove(USER_KEY)
    }
}

/// Favorited tool ids, in the order they were added.
#[derive(Clone)]
pub struct FavoritesRepository {
    store: Arc<dyn KeyValueStore>,
}

impl FavoritesRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Stored favorites. An unreadable entry reads as none.
    pub fn list(&self) -> StudioResult<Vec<u32>> {
        let Some(raw) = self.store.get(FAVORITES_KEY)? else {
            return Ok(Vec::new());
        };
        Ok(serde_json::from_str(&raw).unwrap_or_else(|error| {
            warn!(%error, "ignoring unreadable stored favorites");
            Vec::new()
        }))
    }

    pub fn is_favorite(&self, tool_id: u32) -> StudioResult<bool> {
        Ok(self.list()?.contains(&tool_id))
    }

    /// Adds or removes `tool_id` and returns the new list.
    pub fn toggle(&self, tool_id: u32) -> StudioResult<Vec<u32>> {
        let mut favorites = self.list()?;
        if favorites.contains(&tool_id) {
            favorites.retain(|id| *id != tool_id);
        } else {
            favorites.push(tool_id);
        }
        self.store
            .set(FAVORITES_KEY, &serde_json::to_string(&favorites)?)?;
        Ok(favorites)
    }
}
