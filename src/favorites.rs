use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::*;

use crate::model::{FavoriteEntry, Record};
use crate::storage::KeyValueStore;

pub const FAVORITES_KEY: &str = "favorites_v1";
pub const MAX_FAVORITES: usize = 200;

/// Most-recent-first list of favorites kept as one JSON blob in a [`KeyValueStore`].
///
/// Every mutation rewrites the whole blob. Unreadable or corrupt data reads as an empty list.
pub struct FavoritesStore<S> {
    store: S,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    pub fn new(store: S) -> Self {
        FavoritesStore { store }
    }

    pub fn list(&self) -> Vec<FavoriteEntry> {
        let raw = match self.store.get(FAVORITES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return vec![],
            Err(e) => {
                warn!("Unable to read favorites, treating as empty: {:#}", e);
                return vec![];
            }
        };
        serde_json::from_slice(&raw).unwrap_or_else(|e| {
            warn!("Stored favorites are corrupt, treating as empty: {}", e);
            vec![]
        })
    }

    pub fn add(&mut self, record: Record) -> Result<()> {
        self.add_at(record, Utc::now())
    }

    pub fn add_at(&mut self, record: Record, saved_at: DateTime<Utc>) -> Result<()> {
        let mut favorites = self.list();
        favorites.insert(0, FavoriteEntry::new(record, saved_at));
        favorites.truncate(MAX_FAVORITES);
        self.write(&favorites)
    }

    /// Out of range is a no-op
    pub fn remove(&mut self, index: usize) -> Result<()> {
        let mut favorites = self.list();
        if index >= favorites.len() {
            debug!("Ignoring remove of favorite {} of {}", index, favorites.len());
            return Ok(());
        }
        favorites.remove(index);
        self.write(&favorites)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.write(&[])
    }

    fn write(&mut self, favorites: &[FavoriteEntry]) -> Result<()> {
        let blob = serde_json::to_vec(favorites)?;
        self.store.set(FAVORITES_KEY, &blob)
            .with_context(|| "Error saving favorites")
    }
}
