//! Key/value persistence slots.
//!
//! A [`Storage`] holds named text slots. The engine keeps its whole
//! collection in a single slot and rewrites it after every change.

use std::{
    collections::HashMap,
    fs, io,
    path::PathBuf,
};

pub trait Storage {
    /// Returns the slot content, or `None` when the slot was never written.
    fn read(&self, key: &str) -> io::Result<Option<String>>;

    /// Replaces the slot content.
    fn write(&mut self, key: &str, value: &str) -> io::Result<()>;
}

/// One `<key>.json` file per slot inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.slot_path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.slot_path(key), value)
    }
}

/// In-process slots, gone when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `key` already holding `value`.
    pub fn with_slot(key: &str, value: &str) -> Self {
        let mut storage = Self::default();
        storage.slots.insert(key.to_string(), value.to_string());
        storage
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
