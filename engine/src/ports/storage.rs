use crate::error::StorageError;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Namespace used when no prefix is configured.
pub const DEFAULT_KEY_PREFIX: &str = "download-manager";

/// String key-value storage surviving restarts.
///
/// A missing key is a normal state and reads as `None`.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Write several keys as one update.
    ///
    /// Stores that can commit a batch atomically should override this.
    fn set_entries(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

/// Keys of the two persisted preference slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceKeys {
    selected_theme: String,
    auto_enabled: String,
}

impl PreferenceKeys {
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            selected_theme: format!("{prefix}-theme"),
            auto_enabled: format!("{prefix}-auto-theme-enabled"),
        }
    }

    pub fn selected_theme(&self) -> &str {
        &self.selected_theme
    }

    pub fn auto_enabled(&self) -> &str {
        &self.auto_enabled
    }
}

impl Default for PreferenceKeys {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_KEY_PREFIX)
    }
}

/// Storage that is not there: reads nothing, drops writes.
#[derive(Debug, Default, Clone, Copy)]
pub struct InertStore;

impl PreferenceStore for InertStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

fn lock_entries<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| {
        log::warn!("Preference store lock poisoned, recovering");
        poisoned.into_inner()
    })
}

/// Process-local storage, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Mutex::new(entries),
        }
    }

    pub fn len(&self) -> usize {
        lock_entries(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        lock_entries(&self.entries).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        lock_entries(&self.entries).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn set_entries(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        let mut stored = lock_entries(&self.entries);
        for (key, value) in entries {
            stored.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }
}

/// Preferences kept as a flat TOML table of strings in a single file.
///
/// The file is read once when opened and replaced on every write through a
/// temporary sibling and a rename, so readers never see a partial file. A missing
/// file starts empty; an unreadable or corrupt one is logged and also starts
/// empty, so a damaged preference file never blocks startup.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    pub const DEFAULT_FILE_NAME: &'static str = "preferences.toml";

    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match Self::read_entries(&path) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("{e}; starting with empty preferences");
                BTreeMap::new()
            }
        };
        log::debug!(
            "Opened preference file {} with {} entries",
            path.display(),
            entries.len()
        );

        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    /// `<config dir>/<app_name>/preferences.toml`, falling back to `~/.config`.
    pub fn default_path(app_name: &str) -> Option<PathBuf> {
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .map(|dir| dir.join(app_name).join(Self::DEFAULT_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(path: &Path) -> Result<BTreeMap<String, String>, StorageError> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(path).map_err(|source| StorageError::Io {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&content).map_err(|e| StorageError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let content =
            toml::to_string(entries).map_err(|e| StorageError::Serialize(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                    path: parent.display().to_string(),
                    source,
                })?;
            }
        }

        let temp = self.temp_path();
        fs::write(&temp, content).map_err(|source| StorageError::Io {
            path: temp.display().to_string(),
            source,
        })?;
        fs::rename(&temp, &self.path).map_err(|source| {
            let _ = fs::remove_file(&temp);
            StorageError::Io {
                path: self.path.display().to_string(),
                source,
            }
        })
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| Self::DEFAULT_FILE_NAME.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        lock_entries(&self.entries).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.set_entries(&[(key, value)])
    }

    fn set_entries(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        let mut stored = lock_entries(&self.entries);
        let mut updated = stored.clone();
        for (key, value) in entries {
            updated.insert(key.to_string(), value.to_string());
        }
        self.write_entries(&updated)?;
        *stored = updated;
        Ok(())
    }
}
