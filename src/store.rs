//! Durable collections: history, favorites and scheduled recipes.
//!
//! Each collection lives under its own key and is written in full after every
//! mutation. Reading happens once, when the store is opened.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

use crate::model::{SavedRecipe, SearchSession};

pub const SCHEDULED_KEY: &str = "scheduledRecipes";
pub const FAVORITES_KEY: &str = "favoriteRecipes";
pub const HISTORY_KEY: &str = "recipeHistorySessions";

/// Maximum number of sessions kept in history.
pub const HISTORY_LIMIT: usize = 20;

/// Key-value bucket storage behind the collection store.
pub trait StorageBackend {
    /// Returns `Ok(None)` when nothing was ever stored under `key`.
    fn read(&self, key: &str) -> io::Result<Option<String>>;
    /// Replaces whatever is stored under `key`.
    fn write(&self, key: &str, contents: &str) -> io::Result<()>;
}

/// One `<key>.json` file per collection inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StorageBackend for FileStorage {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, key: &str, contents: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        // Replace via rename; readers never see a partial bucket.
        let tmp = self.dir.join(format!(".{}.json.tmp", key));
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, self.path_for(key))
    }
}

/// In-process storage. Clones share the same buckets, which lets tests
/// "restart" by opening a second store over the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    buckets: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.buckets.lock().ok().and_then(|b| b.get(key).cloned())
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        let buckets = self
            .buckets
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "memory storage poisoned"))?;
        Ok(buckets.get(key).cloned())
    }

    fn write(&self, key: &str, contents: &str) -> io::Result<()> {
        let mut buckets = self
            .buckets
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "memory storage poisoned"))?;
        buckets.insert(key.to_string(), contents.to_string());
        Ok(())
    }
}

/// Reads one collection. Missing or corrupt data loads as empty.
fn load_collection<T: DeserializeOwned>(backend: &dyn StorageBackend, key: &str) -> Vec<T> {
    match backend.read(key) {
        Ok(Some(contents)) => match serde_json::from_str(&contents) {
            Ok(items) => items,
            Err(e) => {
                warn!(key, error = %e, "stored collection is corrupt, starting empty");
                Vec::new()
            }
        },
        Ok(None) => Vec::new(),
        Err(e) => {
            warn!(key, error = %e, "failed to read stored collection, starting empty");
            Vec::new()
        }
    }
}

/// Writes one collection in full. Failures are logged, never propagated.
fn save_collection<T: Serialize>(backend: &dyn StorageBackend, key: &str, items: &[T]) {
    let contents = match serde_json::to_string(items) {
        Ok(contents) => contents,
        Err(e) => {
            warn!(key, error = %e, "failed to serialize collection");
            return;
        }
    };
    match backend.write(key, &contents) {
        Ok(()) => debug!(key, entries = items.len(), "collection saved"),
        Err(e) => warn!(key, error = %e, "failed to persist collection"),
    }
}

pub struct CollectionStore {
    backend: Box<dyn StorageBackend>,
    pub(crate) history: Vec<SearchSession>,
    pub(crate) favorites: Vec<SavedRecipe>,
    pub(crate) scheduled: Vec<SavedRecipe>,
}

impl CollectionStore {
    /// Loads all three collections from `backend`.
    pub fn open(backend: impl StorageBackend + 'static) -> Self {
        let backend: Box<dyn StorageBackend> = Box::new(backend);
        let history: Vec<SearchSession> = load_collection(backend.as_ref(), HISTORY_KEY);
        let favorites: Vec<SavedRecipe> = load_collection(backend.as_ref(), FAVORITES_KEY);
        let scheduled: Vec<SavedRecipe> = load_collection(backend.as_ref(), SCHEDULED_KEY);
        debug!(
            history = history.len(),
            favorites = favorites.len(),
            scheduled = scheduled.len(),
            "collections loaded"
        );
        Self {
            backend,
            history,
            favorites,
            scheduled,
        }
    }

    /// Most recent first.
    pub fn history(&self) -> &[SearchSession] {
        &self.history
    }

    pub fn favorites(&self) -> &[SavedRecipe] {
        &self.favorites
    }

    pub fn scheduled(&self) -> &[SavedRecipe] {
        &self.scheduled
    }

    pub(crate) fn save_history(&self) {
        save_collection(self.backend.as_ref(), HISTORY_KEY, &self.history);
    }

    pub(crate) fn save_favorites(&self) {
        save_collection(self.backend.as_ref(), FAVORITES_KEY, &self.favorites);
    }

    pub(crate) fn save_scheduled(&self) {
        save_collection(self.backend.as_ref(), SCHEDULED_KEY, &self.scheduled);
    }

    /// Prepends a session, evicting the oldest beyond `HISTORY_LIMIT`.
    pub fn record_session(&mut self, session: SearchSession) {
        self.history.insert(0, session);
        self.history.truncate(HISTORY_LIMIT);
        self.save_history();
    }

    pub fn find_session(&self, session_id: &str) -> Option<&SearchSession> {
        self.history.iter().find(|s| s.id == session_id)
    }
}
