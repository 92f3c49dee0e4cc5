use crate::prelude::SiteResult;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Key-value medium backing the selection handoff between contexts.
pub trait SelectionStore: Send {
    fn set(&mut self, key: &str, value: &str) -> SiteResult<()>;
    fn get(&self, key: &str) -> SiteResult<Option<String>>;
    fn remove(&mut self, key: &str) -> SiteResult<()>;
    /// Drops every entry, including contents that no longer parse.
    fn reset(&mut self) -> SiteResult<()>;
}

/// Process-local store, mostly for tests and one-shot runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SelectionStore for MemoryStore {
    fn set(&mut self, key: &str, value: &str) -> SiteResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> SiteResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn remove(&mut self, key: &str) -> SiteResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn reset(&mut self) -> SiteResult<()> {
        self.entries.clear();
        Ok(())
    }
}

/// JSON file store; entries survive a restart of the process.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> SiteResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> SiteResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_vec_pretty(entries)?)?;
        Ok(())
    }
}

impl SelectionStore for FileStore {
    fn set(&mut self, key: &str, value: &str) -> SiteResult<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn get(&self, key: &str) -> SiteResult<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn remove(&mut self, key: &str) -> SiteResult<()> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }

    fn reset(&mut self) -> SiteResult<()> {
        if !self.path.exists() {
            return Ok(());
        }
        self.save(&BTreeMap::new())
    }
}
