//! Persistence port implementations

use super::entity::{TweakDocument, ValueRecord};
use crate::contract::StoredValue;
use crate::domain::repository::TweakPersistence;
use anyhow::{Context, Result};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

// ===== In-memory =====

/// Process-local persistence; overrides are lost on exit
#[derive(Debug, Default)]
pub struct InMemoryPersistence {
    values: RwLock<HashMap<String, StoredValue>>,
}

impl InMemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }
}

impl TweakPersistence for InMemoryPersistence {
    fn get(&self, key: &str) -> Result<Option<StoredValue>> {
        Ok(self.values.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: StoredValue) -> Result<()> {
        self.values.write().insert(key.to_string(), value);
        Ok(())
    }

    fn clear_all(&self) -> Result<()> {
        self.values.write().clear();
        Ok(())
    }
}

// ===== JSON file =====

/// One JSON document per store, rewritten on every change
///
/// Values are cached in memory; the file is read once, on open.
#[derive(Debug)]
pub struct JsonFilePersistence {
    path: PathBuf,
    values: RwLock<BTreeMap<String, StoredValue>>,
}

impl JsonFilePersistence {
    /// Open the document at `path`; a missing file means no overrides
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = if path.exists() {
            Self::load(&path)?
        } else {
            BTreeMap::new()
        };

        tracing::debug!(
            path = %path.display(),
            values = values.len(),
            "opened tweak persistence file"
        );

        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> Result<BTreeMap<String, StoredValue>> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let document: TweakDocument = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        let mut values = BTreeMap::new();
        for (key, raw) in document.values {
            let decoded = serde_json::from_value::<ValueRecord>(raw)
                .map_err(anyhow::Error::from)
                .and_then(StoredValue::try_from);

            match decoded {
                Ok(value) => {
                    values.insert(key, value);
                }
                Err(err) => {
                    tracing::warn!(
                        key = %key,
                        error = %err,
                        "skipping undecodable persisted tweak value"
                    );
                }
            }
        }
        Ok(values)
    }

    /// Write `values` to a sibling temp file and rename it over the document
    fn flush(&self, values: &BTreeMap<String, StoredValue>) -> Result<()> {
        let mut document = TweakDocument::default();
        for (key, value) in values {
            let record = serde_json::to_value(ValueRecord::from(value))
                .with_context(|| format!("failed to encode tweak value '{}'", key))?;
            document.values.insert(key.clone(), record);
        }
        let contents = serde_json::to_string_pretty(&document)?;

        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;

        let mut file = tempfile::NamedTempFile::new_in(parent)
            .with_context(|| format!("failed to create temp file in {}", parent.display()))?;
        file.write_all(contents.as_bytes())
            .and_then(|()| file.as_file().sync_all())
            .with_context(|| format!("failed to write {}", file.path().display()))?;
        file.persist(&self.path)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }
}

impl TweakPersistence for JsonFilePersistence {
    fn get(&self, key: &str) -> Result<Option<StoredValue>> {
        Ok(self.values.read().get(key).cloned())
    }

    // The cache only changes once the document is on disk.
    fn set(&self, key: &str, value: StoredValue) -> Result<()> {
        let mut values = self.values.write();
        let mut updated = values.clone();
        updated.insert(key.to_string(), value);
        self.flush(&updated)?;
        *values = updated;
        Ok(())
    }

    fn clear_all(&self) -> Result<()> {
        let mut values = self.values.write();
        let cleared = BTreeMap::new();
        self.flush(&cleared)?;
        *values = cleared;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{Color, StringOption};

    #[test]
    fn test_in_memory_set_get_clear() {
        let persistence = InMemoryPersistence::new();
        assert!(persistence.get("UI|Colors|background").unwrap().is_none());

        persistence
            .set("UI|Colors|background", StoredValue::Color(Color::BLACK))
            .unwrap();
        assert_eq!(
            persistence.get("UI|Colors|background").unwrap(),
            Some(StoredValue::Color(Color::BLACK))
        );

        persistence.clear_all().unwrap();
        assert!(persistence.is_empty());
    }

    #[test]
    fn test_json_file_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Tweaks.json");

        let persistence = JsonFilePersistence::open(&path).unwrap();
        persistence.set("UI|Layout|padding", StoredValue::Integer(12)).unwrap();
        persistence
            .set("UI|Theme|mode", StoredValue::StringList(StringOption::from("dark")))
            .unwrap();
        drop(persistence);

        let reopened = JsonFilePersistence::open(&path).unwrap();
        assert_eq!(
            reopened.get("UI|Layout|padding").unwrap(),
            Some(StoredValue::Integer(12))
        );
        assert_eq!(
            reopened.get("UI|Theme|mode").unwrap(),
            Some(StoredValue::StringList(StringOption::from("dark")))
        );
    }

    #[test]
    fn test_json_file_missing_is_empty_and_created_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("Tweaks.json");

        let persistence = JsonFilePersistence::open(&path).unwrap();
        assert!(persistence.get("A|B|c").unwrap().is_none());
        assert!(!path.exists());

        persistence.set("A|B|c", StoredValue::Boolean(true)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_json_file_clear_all_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Tweaks.json");

        let persistence = JsonFilePersistence::open(&path).unwrap();
        persistence.set("A|B|c", StoredValue::Double(2.5)).unwrap();
        persistence.clear_all().unwrap();

        let reopened = JsonFilePersistence::open(&path).unwrap();
        assert!(reopened.get("A|B|c").unwrap().is_none());
    }

    #[test]
    fn test_json_file_skips_undecodable_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Tweaks.json");
        fs::write(
            &path,
            r##"{
                "values": {
                    "A|B|good": {"kind": "boolean", "value": true},
                    "A|B|unknown_kind": {"kind": "vector", "value": [1, 2]},
                    "A|B|bad_color": {"kind": "color", "value": "teal"}
                }
            }"##,
        )
        .unwrap();

        let persistence = JsonFilePersistence::open(&path).unwrap();
        assert_eq!(
            persistence.get("A|B|good").unwrap(),
            Some(StoredValue::Boolean(true))
        );
        assert!(persistence.get("A|B|unknown_kind").unwrap().is_none());
        assert!(persistence.get("A|B|bad_color").unwrap().is_none());
    }

    #[test]
    fn test_json_file_failed_write_keeps_previous_values() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "a regular file").unwrap();
        let path = blocker.join("Tweaks.json");

        let persistence = JsonFilePersistence::open(&path).unwrap();
        assert!(persistence.set("A|B|c", StoredValue::Integer(99)).is_err());
        assert!(persistence.get("A|B|c").unwrap().is_none());
    }

    #[test]
    fn test_json_file_failed_clear_keeps_previous_values() {
        let dir = tempfile::tempdir().unwrap();
        let store_dir = dir.path().join("store");
        let path = store_dir.join("Tweaks.json");

        let persistence = JsonFilePersistence::open(&path).unwrap();
        persistence.set("A|B|c", StoredValue::Integer(7)).unwrap();

        fs::remove_dir_all(&store_dir).unwrap();
        fs::write(&store_dir, "a regular file").unwrap();

        assert!(persistence.clear_all().is_err());
        assert_eq!(persistence.get("A|B|c").unwrap(), Some(StoredValue::Integer(7)));
    }

    #[test]
    fn test_json_file_leaves_no_temp_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Tweaks.json");

        let persistence = JsonFilePersistence::open(&path).unwrap();
        persistence.set("A|B|c", StoredValue::Boolean(true)).unwrap();
        persistence.set("A|B|c", StoredValue::Boolean(false)).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_json_file_corrupt_document_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Tweaks.json");
        fs::write(&path, "not json").unwrap();

        let err = JsonFilePersistence::open(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }
}
