use anyhow::{Context, Result};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use log::*;

/// Durable key-value substrate holding opaque blobs.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn set(&mut self, key: &str, value: &[u8]) -> Result<()>;
}

/// Non-durable store, for tests and dry runs
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        self.entries.insert(key.to_owned(), value.to_vec());
        Ok(())
    }
}

/// One `<key>.json` file per key under a state directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    /// Expands `~` and env vars in `dir`
    pub fn open(dir: &str) -> Result<Self> {
        let path = shellexpand::full(dir)
            .with_context(|| format!("State directory path {} is invalid", dir))?;
        Ok(Self::new(Path::new(path.as_ref())))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

fn read_if_found(path: &Path) -> Result<Option<Vec<u8>>> {
    match std::fs::read(&path) {
        Ok(c) => Ok(Some(c)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key);
        debug!("Reading {:?}", path);
        read_if_found(&path).with_context(|| format!("Error reading {:?}", path))
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Error ensuring path {:?} exists", self.dir))?;
        let path = self.path_for(key);
        debug!("Writing {} bytes to {:?}", value.len(), path);
        std::fs::write(&path, value)
            .with_context(|| format!("Error writing {:?}", path))
    }
}
