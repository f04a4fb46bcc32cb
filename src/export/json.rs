//! JSON import/export of the deck.
//! Files use the same layout as the stored deck: an array of
//! `{ "id", "prompt", "answer" }` objects.

use crate::database::Result;
use crate::models::Card;
use chrono::NaiveDate;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Suggested file name for an export made on `date`.
pub fn default_export_name(date: NaiveDate) -> String {
    format!("flashdeck-{}.json", date.format("%Y-%m-%d"))
}

/// Writes the cards to a JSON file at the specified path.
pub fn export_deck_to_path(cards: &[Card], path: &Path) -> Result<()> {
    let json_string = serde_json::to_string_pretty(cards)?;
    let mut file = File::create(path)?;
    file.write_all(json_string.as_bytes())?;
    log::info!("Exported {} cards to {}", cards.len(), path.display());
    Ok(())
}

/// Reads cards from a JSON file.
/// Fails if the file doesn't exist or isn't a card array.
pub fn import_deck(path: &Path) -> Result<Vec<Card>> {
    let contents = fs::read_to_string(path)?;
    let cards: Vec<Card> = serde_json::from_str(&contents)?;
    log::info!("Read {} cards from {}", cards.len(), path.display());
    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_cards() -> Vec<Card> {
        vec![
            Card::new("hello", "cześć"),
            Card::new("goodbye", "do widzenia"),
        ]
    }

    #[test]
    fn test_default_export_name() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

        assert_eq!(default_export_name(date), "flashdeck-2026-10-19.json");
    }

    #[test]
    fn test_export_deck_to_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("export.json");

        let result = export_deck_to_path(&create_test_cards(), &path);
        assert!(result.is_ok());

        assert!(fs::metadata(&path).is_ok(), "File should exist");
    }

    #[test]
    fn test_import_deck() {
        let json_content = r#"[
  {
    "id": "6f1c2a4e-0a55-4c1e-9f3b-6f0a3c9e2b11",
    "prompt": "test prompt",
    "answer": "test answer"
  }
]"#;
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("import.json");
        fs::write(&path, json_content).unwrap();

        let cards = import_deck(&path).unwrap();

        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].id.to_string(), "6f1c2a4e-0a55-4c1e-9f3b-6f0a3c9e2b11");
        assert_eq!(cards[0].prompt, "test prompt");
        assert_eq!(cards[0].answer, "test answer");
    }

    #[test]
    fn test_export_and_import_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("roundtrip.json");
        let cards = create_test_cards();

        export_deck_to_path(&cards, &path).unwrap();

        assert_eq!(import_deck(&path).unwrap(), cards);
    }

    #[test]
    fn test_import_nonexistent_file() {
        let result = import_deck(Path::new("nonexistent_file_xyz123.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_import_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("invalid.json");
        fs::write(&path, "{ this is not valid json }").unwrap();

        assert!(import_deck(&path).is_err());
    }
}
