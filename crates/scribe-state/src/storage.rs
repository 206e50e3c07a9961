//! Key-value preference storage.
//!
//! [`PreferenceStore`] stands in for the browser's local storage. The theme
//! store persists under the `"theme"` key.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::StateError;

/// Persistent string key-value storage.
pub trait PreferenceStore {
    /// Read a value. Missing keys return `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StateError>;
}

/// In-memory preferences.
#[derive(Debug, Default, Clone)]
pub struct MemoryPreferences {
    values: HashMap<String, String>,
    read_only: bool,
}

impl MemoryPreferences {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Preferences pre-populated with one value.
    #[must_use]
    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_owned(), value.to_owned());
        self
    }

    /// Preferences that reject every write (like storage disabled in a
    /// private browsing window).
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StateError> {
        if self.read_only {
            return Err(StateError::Unavailable(format!(
                "cannot write {key}: storage is read-only"
            )));
        }
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Preferences persisted as a JSON object file.
///
/// Every [`set`](PreferenceStore::set) rewrites the file.
#[derive(Debug)]
pub struct FilePreferences {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FilePreferences {
    /// Load preferences from `path`. A missing file yields empty preferences.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StateError> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|source| StateError::Json {
                    path: path.clone(),
                    source,
                })?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StateError::Io { path, source }),
        };

        tracing::debug!(path = %path.display(), entries = values.len(), "Loaded preferences");
        Ok(Self { path, values })
    }

    /// Write all preferences to the file, creating parent directories.
    pub fn save(&self) -> Result<(), StateError> {
        let io_err = |source| StateError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let content = serde_json::to_string_pretty(&self.values).map_err(|source| {
            StateError::Json {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, content).map_err(io_err)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StateError> {
        self.values.insert(key.to_owned(), value.to_owned());
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_memory_round_trip() {
        let mut prefs = MemoryPreferences::new();
        assert_eq!(prefs.get("theme"), None);
        prefs.set("theme", "dark").unwrap();
        assert_eq!(prefs.get("theme"), Some("dark".to_owned()));
    }

    #[test]
    fn test_memory_read_only_rejects_writes() {
        let mut prefs = MemoryPreferences::new()
            .with_value("theme", "light")
            .read_only();
        assert!(matches!(
            prefs.set("theme", "dark"),
            Err(StateError::Unavailable(_))
        ));
        assert_eq!(prefs.get("theme"), Some("light".to_owned()));
    }

    #[test]
    fn test_file_missing_is_empty() {
        let temp = TempDir::new().unwrap();
        let prefs = FilePreferences::load(temp.path().join("prefs.json")).unwrap();
        assert_eq!(prefs.get("theme"), None);
    }

    #[test]
    fn test_file_persists_across_loads() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/dir/prefs.json");

        let mut prefs = FilePreferences::load(&path).unwrap();
        prefs.set("theme", "dark").unwrap();

        let reloaded = FilePreferences::load(&path).unwrap();
        assert_eq!(reloaded.get("theme"), Some("dark".to_owned()));
        assert_eq!(reloaded.path(), path);
    }

    #[test]
    fn test_file_invalid_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("prefs.json");
        fs::write(&path, "not json").unwrap();

        let result = FilePreferences::load(&path);
        assert!(matches!(result, Err(StateError::Json { .. })));
    }
}
