// =============================================================================
// prefs.rs - Stockage clé-valeur persistant des préférences
// prefs.rs - Persistent key-value preference storage
// =============================================================================

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config;
use crate::error::{Result, RgbaError};

/// Magasin de préférences entières, privé à l'application
/// Application-private store of integer preferences
///
/// Writes are staged by `put_int` and only reach the backing storage on
/// `commit`.
pub trait Preferences {
    /// Lit une valeur, ou `default` si la clé est absente
    /// Reads a value, or `default` when the key is missing
    fn get_int(&self, key: &str, default: i32) -> i32;

    fn put_int(&mut self, key: &str, value: i32);

    /// Persiste les écritures en attente / Persists pending writes
    fn commit(&mut self) -> Result<()>;
}

// =============================================================================
// IMPLÉMENTATION EN MÉMOIRE
// IN-MEMORY IMPLEMENTATION
// =============================================================================

#[derive(Clone, Debug, Default)]
pub struct MemoryPreferences {
    values: BTreeMap<String, i32>,
    commits: usize,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful commits so far
    pub fn commits(&self) -> usize {
        self.commits
    }
}

impl Preferences for MemoryPreferences {
    fn get_int(&self, key: &str, default: i32) -> i32 {
        self.values.get(key).copied().unwrap_or(default)
    }

    fn put_int(&mut self, key: &str, value: i32) {
        self.values.insert(key.to_string(), value);
    }

    fn commit(&mut self) -> Result<()> {
        self.commits += 1;
        Ok(())
    }
}

// =============================================================================
// IMPLÉMENTATION FICHIER JSON
// JSON FILE IMPLEMENTATION
// =============================================================================

/// Préférences stockées dans un objet JSON plat
/// Preferences stored as a flat JSON object
///
/// ```json
/// { "alpha": 100, "blue": 85, "green": 178, "red": 255 }
/// ```
#[derive(Clone, Debug)]
pub struct JsonPreferences {
    path: PathBuf,
    values: BTreeMap<String, i32>,
}

impl JsonPreferences {
    /// Chemin du fichier pour un espace de noms donné
    /// File path for a given namespace
    ///
    /// `<config dir>/<namespace>/preferences.json`
    pub fn namespace_path(namespace: &str) -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(RgbaError::NoConfigDir)?;
        Ok(config_dir.join(namespace).join(config::PREFERENCES_FILE))
    }

    /// Opens the preferences of the given namespace in the platform config directory
    pub fn open_namespace(namespace: &str) -> Result<Self> {
        Self::open(Self::namespace_path(namespace)?)
    }

    /// Ouvre un fichier de préférences; un fichier absent donne un magasin vide
    /// Opens a preference file; a missing file yields an empty store
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            log::debug!("No preference file at {}, starting empty", path.display());
            return Ok(Self {
                path,
                values: BTreeMap::new(),
            });
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| RgbaError::io(format!("Failed to read {}", path.display()), e))?;
        let values = serde_json::from_str(&content)
            .map_err(|e| RgbaError::json(format!("Failed to parse {}", path.display()), e))?;

        log::debug!("Loaded preferences from {}", path.display());
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Preferences for JsonPreferences {
    fn get_int(&self, key: &str, default: i32) -> i32 {
        self.values.get(key).copied().unwrap_or(default)
    }

    fn put_int(&mut self, key: &str, value: i32) {
        self.values.insert(key.to_string(), value);
    }

    fn commit(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| RgbaError::io(format!("Failed to create {}", parent.display()), e))?;
        }

        let json = serde_json::to_string_pretty(&self.values)
            .map_err(|e| RgbaError::json("Failed to serialize preferences", e))?;
        fs::write(&self.path, json)
            .map_err(|e| RgbaError::io(format!("Failed to write {}", self.path.display()), e))?;

        log::debug!("Committed preferences to {}", self.path.display());
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_defaults_and_writes() {
        let mut prefs = MemoryPreferences::new();
        assert_eq!(prefs.get_int("red", 255), 255);

        prefs.put_int("red", 12);
        assert_eq!(prefs.get_int("red", 255), 12);

        prefs.commit().unwrap();
        assert_eq!(prefs.commits(), 1);
    }

    #[test]
    fn test_json_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let prefs = JsonPreferences::open(dir.path().join("nope.json")).unwrap();
        assert_eq!(prefs.get_int("green", 178), 178);
    }

    #[test]
    fn test_json_commit_creates_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("RGB-A Tool").join("preferences.json");

        let mut prefs = JsonPreferences::open(&path).unwrap();
        prefs.put_int("blue", 85);
        prefs.commit().unwrap();
        assert!(path.exists());

        let reopened = JsonPreferences::open(&path).unwrap();
        assert_eq!(reopened.get_int("blue", 0), 85);
    }

    #[test]
    fn test_json_uncommitted_writes_are_lost() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");

        let mut prefs = JsonPreferences::open(&path).unwrap();
        prefs.put_int("alpha", 40);
        drop(prefs);

        let reopened = JsonPreferences::open(&path).unwrap();
        assert_eq!(reopened.get_int("alpha", 100), 100);
    }

    #[test]
    fn test_json_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "{ red: oops").unwrap();

        assert!(matches!(JsonPreferences::open(&path), Err(RgbaError::Json { .. })));
    }
}
