use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::model::{AppConfig, ShoppingList};

/// Error type for document I/O
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("no shopping list here: no larder.toml found (run `lar init`)")]
    NotFound,
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not serialize list: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("could not parse larder.toml: {0}")]
    Config(#[from] toml::de::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Find the list root by walking up from `start` looking for larder.toml.
pub fn discover_root(start: &Path) -> Result<PathBuf, DocumentError> {
    let mut current = start.to_path_buf();
    loop {
        if current.join("larder.toml").is_file() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(DocumentError::NotFound);
        }
    }
}

/// Load larder.toml from the root directory.
pub fn load_config(root: &Path) -> Result<AppConfig, DocumentError> {
    let path = root.join("larder.toml");
    let text = fs::read_to_string(&path).map_err(|e| DocumentError::Read {
        path: path.clone(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}

/// Absolute path of the list document.
pub fn list_path(root: &Path, config: &AppConfig) -> PathBuf {
    root.join(&config.list.file)
}

/// Load the list document. A missing file is an empty list — the state
/// right after init, or a sync target that has not been written yet.
pub fn load_list(path: &Path) -> Result<ShoppingList, DocumentError> {
    if !path.exists() {
        debug!(path = %path.display(), "list document missing, starting empty");
        return Ok(ShoppingList::new());
    }
    let text = fs::read_to_string(path).map_err(|e| DocumentError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&text).map_err(|e| DocumentError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Save the list document atomically: readers and the watcher never see a
/// half-written file.
pub fn save_list(path: &Path, list: &ShoppingList) -> Result<(), DocumentError> {
    let mut content = serde_json::to_string_pretty(list)?;
    content.push('\n');
    atomic_write(path, content.as_bytes()).map_err(|e| {
        warn!(path = %path.display(), error = %e, "list write failed, document unchanged");
        DocumentError::Write {
            path: path.to_path_buf(),
            source: e,
        }
    })
}

/// Write via a temp file in the same directory, then rename into place.
fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::item_ops::{AddItemOptions, Candidate, insert_candidate};
    use tempfile::TempDir;

    #[test]
    fn test_discover_root_walks_up() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("larder.toml"), "").unwrap();
        let sub = tmp.path().join("a/b");
        fs::create_dir_all(&sub).unwrap();

        let root = discover_root(&sub).unwrap();
        assert_eq!(root, tmp.path());
    }

    #[test]
    fn test_discover_root_not_found() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            discover_root(tmp.path()),
            Err(DocumentError::NotFound)
        ));
    }

    #[test]
    fn test_missing_document_is_empty_list() {
        let tmp = TempDir::new().unwrap();
        let list = load_list(&tmp.path().join("list.json")).unwrap();
        assert!(list.items.is_empty());
        assert!(list.stores.is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("list.json");

        let mut list = ShoppingList::new();
        crate::ops::store_ops::add_store(&mut list, "Kroger");
        let id = insert_candidate(&mut list, Candidate {
            name: "Milk".into(),
            quantity: Some("2 gallons".into()),
            options: AddItemOptions {
                store_id: Some("s-001".into()),
                organic_required: true,
                ..Default::default()
            },
        });
        // Annotations written by the meal planner ride along untouched.
        list.item_mut(&id).unwrap().meal_sources.push(crate::model::MealSource {
            meal_id: "m-014".into(),
            meal_name: "Pancakes".into(),
            date: "2026-08-09".into(),
        });
        list.recently_removed.push("Bread".into());

        save_list(&path, &list).unwrap();
        let loaded = load_list(&path).unwrap();
        assert_eq!(loaded, list);
    }

    #[test]
    fn test_document_fields_are_camel_case() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("list.json");

        let mut list = ShoppingList::new();
        insert_candidate(&mut list, Candidate {
            name: "Milk".into(),
            quantity: None,
            options: AddItemOptions {
                store_id: Some("s-001".into()),
                organic_required: true,
                ..Default::default()
            },
        });
        save_list(&path, &list).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"storeId\""));
        assert!(text.contains("\"organicRequired\""));
    }

    #[test]
    fn test_corrupt_document_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("list.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            load_list(&path),
            Err(DocumentError::Parse { .. })
        ));
    }
}
