//! Decklist reading for `.txt` (count-prefixed lines) and `.csv` (`name` column) files

use crate::error::{ProxyError, ProxyResult};
use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

/// Header of the card name column in CSV decklists
pub const NAME_COLUMN: &str = "name";

/// Lines starting with this marker are skipped in text decklists
pub const SIDEBOARD_MARKER: &str = "SIDEBOARD";

/// One card line from the user's decklist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckEntry {
    pub name: String,
}

impl DeckEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Decklist file formats we know how to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckFormat {
    Csv,
    Text,
}

impl DeckFormat {
    /// Detect the format from the file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "csv" => Some(DeckFormat::Csv),
            "txt" => Some(DeckFormat::Text),
            _ => None,
        }
    }
}

/// Read a decklist, picking the parser from the file extension.
///
/// Unsupported extensions are not an error: a message is shown and the deck is empty.
pub fn parse_deck_file<P: AsRef<Path>>(path: P) -> ProxyResult<Vec<DeckEntry>> {
    let path = path.as_ref();

    let entries = match DeckFormat::from_path(path) {
        Some(DeckFormat::Csv) => read_csv_deck(path)?,
        Some(DeckFormat::Text) => read_text_deck(path)?,
        None => {
            log::warn!("Unsupported decklist format: {}", path.display());
            println!("Unsupported file format. Please provide a .csv or .txt file.");
            Vec::new()
        }
    };

    log::info!("Read {} cards from {}", entries.len(), path.display());
    Ok(entries)
}

/// Read card names from the `name` column of a CSV decklist, verbatim
pub fn read_csv_deck<P: AsRef<Path>>(path: P) -> ProxyResult<Vec<DeckEntry>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;

    let column = rdr
        .headers()?
        .iter()
        .position(|h| h == NAME_COLUMN)
        .ok_or_else(|| ProxyError::MissingColumn(NAME_COLUMN.to_string()))?;

    let mut entries = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let name = record.get(column).unwrap_or_default();
        entries.push(DeckEntry::new(name));
    }

    Ok(entries)
}

/// Parse a single text decklist line into a card name.
///
/// Returns `None` for blank lines and sideboard markers. The first token is
/// the count and is dropped whatever it contains.
pub fn parse_deck_line(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with(SIDEBOARD_MARKER) {
        return None;
    }

    let name = line.split_whitespace().skip(1).collect::<Vec<_>>().join(" ");
    Some(name)
}

/// Read card names from a count-prefixed text decklist
pub fn read_text_deck<P: AsRef<Path>>(path: P) -> ProxyResult<Vec<DeckEntry>> {
    let file = File::open(path)?;
    let reader = io::BufReader::new(file);
    let mut entries = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if let Some(name) = parse_deck_line(&line) {
            entries.push(DeckEntry::new(name));
        }
    }

    Ok(entries)
}

#[cfg(test)]
#[path = "decklist_tests.rs"]
mod tests;
