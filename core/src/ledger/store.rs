use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::*;

/// Where a [`Ledger`] reads its table from and writes it back to.
pub trait ScoreStore {
    fn load(&self) -> core::result::Result<HighScores, ScoreError>;
    fn save(&mut self, scores: &HighScores) -> core::result::Result<(), ScoreError>;
}

/// JSON document on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub const DEFAULT_PATH: &'static str = "highscores.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PATH)
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&self) -> core::result::Result<HighScores, ScoreError> {
        let document = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&document)?)
    }

    fn save(&mut self, scores: &HighScores) -> core::result::Result<(), ScoreError> {
        let document = serde_json::to_string_pretty(scores)?;
        fs::write(&self.path, document)?;
        log::debug!("Saved high scores to {}", self.path.display());
        Ok(())
    }
}

/// JSON document kept in memory, for tests and embedders without a filesystem.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    document: Option<String>,
    read_only: bool,
}

impl MemoryStore {
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Some(document.into()),
            read_only: false,
        }
    }

    /// A store whose every write fails.
    pub fn read_only() -> Self {
        Self {
            document: None,
            read_only: true,
        }
    }

    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> core::result::Result<HighScores, ScoreError> {
        let document = self
            .document
            .as_deref()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))?;
        Ok(serde_json::from_str(document)?)
    }

    fn save(&mut self, scores: &HighScores) -> core::result::Result<(), ScoreError> {
        if self.read_only {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied).into());
        }
        self.document = Some(serde_json::to_string(scores)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sweeper-{}-{}.json", std::process::id(), name))
    }

    #[test]
    fn file_round_trip() {
        let path = temp_path("round-trip");
        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.path(), path);
        let mut ledger = Ledger::load(store.clone());
        ledger.record(Difficulty::Beginner, 30);
        ledger.record(Difficulty::Beginner, 10);

        let loaded = store.load().unwrap();
        assert_eq!(loaded.entries(Difficulty::Beginner), [10, 30]);

        store.save(&HighScores::new()).unwrap();
        assert!(store.load().unwrap().is_empty());
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file_is_created() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);

        let ledger = Ledger::load(JsonFileStore::new(&path));

        assert!(ledger.scores().is_empty());
        let written: RawScores = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            written.keys().map(String::as_str).collect::<Vec<_>>(),
            ["Beginner", "Expert", "Intermediate"]
        );
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn malformed_file_is_replaced() {
        let path = temp_path("malformed");
        fs::write(&path, "{\"Beginner\": [1, 2").unwrap();

        let ledger = Ledger::load(JsonFileStore::new(&path));

        assert!(ledger.scores().is_empty());
        assert!(JsonFileStore::new(&path).load().unwrap().is_empty());
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_document_reports_not_found() {
        let err = MemoryStore::default().load().unwrap_err();
        assert!(err.is_not_found());
    }
}
