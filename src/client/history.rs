use serde::{de::DeserializeOwned, Serialize};
use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::models::itinerary::Itinerary;

pub const HISTORY_KEY: &str = "tripHistory";
pub const HISTORY_CAPACITY: usize = 10;

/// Key/value store backed by one `<key>.json` file per key in a directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    dir: PathBuf,
}

impl LocalStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    pub fn get_item(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    pub fn set_item(&self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)
    }

    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get_item(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring unreadable {} entry: {}", key, e);
                None
            }
        }
    }

    pub fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> io::Result<()> {
        let raw = serde_json::to_string(value)?;
        self.set_item(key, &raw)
    }
}

/// Fixed-capacity log of recent itineraries, newest first.
///
/// Insertion order is all that matters; loading an entry does not move it.
#[derive(Debug, Clone)]
pub struct TripHistory {
    entries: VecDeque<Itinerary>,
    capacity: usize,
}

impl Default for TripHistory {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl TripHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn load(storage: &LocalStorage) -> Self {
        let mut history = Self::default();
        if let Some(saved) = storage.get_json::<Vec<Itinerary>>(HISTORY_KEY) {
            history.entries = saved.into_iter().take(history.capacity).collect();
        }
        history
    }

    pub fn save(&self, storage: &LocalStorage) -> io::Result<()> {
        storage.set_json(HISTORY_KEY, &self.entries)
    }

    pub fn push(&mut self, itinerary: Itinerary) {
        self.entries.push_front(itinerary);
        self.entries.truncate(self.capacity);
    }

    pub fn get(&self, index: usize) -> Option<&Itinerary> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> impl Iterator<Item = &Itinerary> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
