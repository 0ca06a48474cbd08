// ============================================================================
// Stockage local clé/valeur
// ============================================================================
// Équivalent client du "local storage" : le jeton d'accès y est rangé sous
// une clé fixe ("access_token"). Le middleware BearerAuth le relit à chaque
// requête.
//
// Le fichier de stockage est un simple objet JSON :
// - Linux   : ~/.local/share/lazyledger/storage.json
// - macOS   : ~/Library/Application Support/lazyledger/storage.json
// - Windows : C:\Users\<user>\AppData\Local\lazyledger\storage.json
// ============================================================================

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use anyhow::{Context, Result};
use tracing::warn;

/// Clé du jeton d'accès
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Stockage persistant côté client
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;
}

/// Stockage dans un fichier JSON
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Emplacement par défaut dans le répertoire de données de l'utilisateur
    pub fn default_location() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join("lazyledger").join("storage.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fichier absent = stockage vide
    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Échec de la lecture de {}", self.path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Fichier de stockage invalide : {}", self.path.display()))
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .context("Échec de la création du répertoire de stockage")?;
        }

        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Échec de l'écriture de {}", self.path.display()))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        match self.load() {
            Ok(mut entries) => entries.remove(key),
            Err(e) => {
                // Un stockage illisible se comporte comme un stockage vide
                warn!(error = ?e, "Local storage unreadable");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}

/// Stockage en mémoire (sessions éphémères, tests)
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_storage(name: &str) -> FileStorage {
        let dir = std::env::temp_dir().join(format!("lazyledger-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        FileStorage::new(dir.join("storage.json"))
    }

    #[test]
    fn test_file_storage_roundtrip() {
        let storage = temp_storage("roundtrip");
        assert_eq!(storage.get(ACCESS_TOKEN_KEY), None);

        storage.set(ACCESS_TOKEN_KEY, "abc.def").unwrap();
        assert_eq!(storage.get(ACCESS_TOKEN_KEY), Some("abc.def".to_string()));

        // Une nouvelle instance relit le même fichier
        let reopened = FileStorage::new(storage.path());
        assert_eq!(reopened.get(ACCESS_TOKEN_KEY), Some("abc.def".to_string()));

        storage.remove(ACCESS_TOKEN_KEY).unwrap();
        assert_eq!(reopened.get(ACCESS_TOKEN_KEY), None);
    }

    #[test]
    fn test_corrupted_file_reads_as_empty() {
        let storage = temp_storage("corrupted");
        std::fs::create_dir_all(storage.path().parent().unwrap()).unwrap();
        std::fs::write(storage.path(), "not json").unwrap();

        assert_eq!(storage.get(ACCESS_TOKEN_KEY), None);
        assert!(storage.set(ACCESS_TOKEN_KEY, "x").is_err());
    }

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::new();
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k"), Some("v".to_string()));
        storage.remove("k").unwrap();
        assert_eq!(storage.get("k"), None);
    }
}
