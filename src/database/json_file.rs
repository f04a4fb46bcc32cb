//! Deck stored as a JSON array in a single file.

use super::{DeckBackend, Result};
use crate::models::Card;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Sibling of the deck file used for the write-then-rename step.
    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "cards.json".to_string());
        self.path.with_file_name(format!(".{}.tmp", name))
    }
}

impl DeckBackend for JsonFileBackend {
    fn read_cards(&self) -> Result<Option<Vec<Card>>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if contents.trim().is_empty() {
            return Ok(None);
        }

        let cards: Vec<Card> = serde_json::from_str(&contents)?;
        Ok(Some(cards))
    }

    fn write_cards(&self, cards: &[Card]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json_string = serde_json::to_string_pretty(cards)?;

        let tmp_path = self.temp_path();
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(json_string.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        Ok(())
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_cards() -> Vec<Card> {
        vec![Card::new("hello", "cześć"), Card::new("goodbye", "do widzenia")]
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(temp_dir.path().join("cards.json"));
        let cards = create_test_cards();

        backend.write_cards(&cards).unwrap();

        assert_eq!(backend.read_cards().unwrap(), Some(cards));
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(temp_dir.path().join("missing.json"));

        assert_eq!(backend.read_cards().unwrap(), None);
    }

    #[test]
    fn test_read_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cards.json");
        fs::write(&path, "{ this is not valid json }").unwrap();

        let result = JsonFileBackend::new(path).read_cards();

        assert!(result.is_err());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("cards.json");
        let backend = JsonFileBackend::new(&path);

        backend.write_cards(&create_test_cards()).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(temp_dir.path().join("cards.json"));

        backend.write_cards(&create_test_cards()).unwrap();
        backend.write_cards(&[]).unwrap();

        assert!(!temp_dir.path().join(".cards.json.tmp").exists());
        assert_eq!(backend.read_cards().unwrap(), Some(Vec::new()));
    }

    #[test]
    fn test_failed_write_keeps_previous_deck() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cards.json");
        let backend = JsonFileBackend::new(&path);
        let cards = create_test_cards();
        backend.write_cards(&cards).unwrap();

        // A directory squatting on the temp path makes File::create fail.
        fs::create_dir(temp_dir.path().join(".cards.json.tmp")).unwrap();
        let result = backend.write_cards(&[Card::new("lost", "write")]);

        assert!(result.is_err());
        assert_eq!(backend.read_cards().unwrap(), Some(cards));
    }
}
