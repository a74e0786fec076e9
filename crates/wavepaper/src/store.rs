use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Storage key for the colour scheme preference.
pub const MODE_KEY: &str = "mode";

/// Small string key-value store for user preferences.
pub trait PreferenceStore {
    /// Returns the stored value for `key` if present.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key` durably.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct StateFile {
    preferences: BTreeMap<String, String>,
}

/// TOML-backed store at a fixed path.
///
/// Loading never fails: a missing, unreadable, or damaged file degrades to
/// an empty map with a warning so the daemon still starts with defaults.
/// Writes rewrite the whole file synchronously.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    state: StateFile,
}

impl FileStore {
    pub fn load_or_default(path: PathBuf) -> Self {
        let state = read_state(&path);
        Self { path, state }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        // A bare relative file name has an empty parent; nothing to create then.
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create state directory {}", dir.display()))?;
        }
        let body = toml::to_string_pretty(&self.state).context("failed to encode preferences")?;
        fs::write(&self.path, body)
            .with_context(|| format!("failed to write preferences to {}", self.path.display()))?;
        Ok(())
    }
}

fn read_state(path: &Path) -> StateFile {
    if !path.exists() {
        debug!(path = %path.display(), "no state file yet, starting with defaults");
        return StateFile::default();
    }

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            warn!(path = %path.display(), %err, "failed to read state file, using defaults");
            return StateFile::default();
        }
    };
    match toml::from_str(&contents) {
        Ok(state) => state,
        Err(err) => {
            warn!(path = %path.display(), %err, "failed to parse state file, using defaults");
            StateFile::default()
        }
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.state.preferences.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.state
            .preferences
            .insert(key.to_string(), value.to_string());
        self.persist()
    }
}

/// Volatile store backing the unit tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::default();
        store.values.insert(key.to_string(), value.to_string());
        store
    }
}

#[cfg(test)]
impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
