use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};

use crate::*;
pub use store::*;

mod store;

/// How many times are kept per difficulty.
pub const MAX_ENTRIES: usize = 10;

type RawScores = BTreeMap<String, Vec<u32>>;

/// Best completion times in seconds, ascending, per difficulty.
///
/// Serialized as a JSON object keyed by difficulty name, e.g.
/// `{"Beginner": [10, 30], "Intermediate": [], "Expert": []}`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "RawScores")]
pub struct HighScores {
    tiers: BTreeMap<Difficulty, Vec<u32>>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            tiers: Difficulty::ALL
                .into_iter()
                .map(|difficulty| (difficulty, Vec::new()))
                .collect(),
        }
    }

    pub fn entries(&self, difficulty: Difficulty) -> &[u32] {
        self.tiers
            .get(&difficulty)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn top_entries(&self, difficulty: Difficulty, n: usize) -> &[u32] {
        let entries = self.entries(difficulty);
        &entries[..n.min(entries.len())]
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.values().all(Vec::is_empty)
    }

    /// Adds a time and returns its 1-based rank, or `None` when it did not
    /// make the cut. Equal times keep their insertion order.
    fn insert(&mut self, difficulty: Difficulty, seconds: u32) -> Option<usize> {
        let entries = self.tiers.entry(difficulty).or_default();
        entries.push(seconds);
        entries.sort();

        // the new entry lands after every equal time already present
        let rank = entries.partition_point(|&time| time <= seconds);
        entries.truncate(MAX_ENTRIES);
        (rank <= MAX_ENTRIES).then_some(rank)
    }
}

impl Default for HighScores {
    fn default() -> Self {
        Self::new()
    }
}

impl From<RawScores> for HighScores {
    fn from(raw: RawScores) -> Self {
        let mut scores = Self::new();
        for (name, mut times) in raw {
            let Ok(difficulty) = name.parse::<Difficulty>() else {
                log::warn!("Ignoring scores for unknown difficulty {:?}", name);
                continue;
            };
            times.sort();
            times.truncate(MAX_ENTRIES);
            scores.tiers.insert(difficulty, times);
        }
        scores
    }
}

impl Serialize for HighScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        self.tiers.serialize(serializer)
    }
}

/// Process-wide high-score table bound to the sink it is persisted to.
#[derive(Debug)]
pub struct Ledger<S> {
    scores: HighScores,
    store: S,
}

/// What happened to a recorded time.
#[derive(Debug)]
pub struct Recorded {
    /// 1-based position in the top list, `None` if it did not make it.
    pub rank: Option<usize>,
    /// The in-memory table keeps the time even if this failed.
    pub saved: core::result::Result<(), ScoreError>,
}

impl Recorded {
    pub fn into_result(self) -> core::result::Result<Option<usize>, ScoreError> {
        self.saved.map(|()| self.rank)
    }
}

impl<S: ScoreStore> Ledger<S> {
    /// Loads the table from `store`. Missing or unreadable data yields an empty
    /// table, which is written back right away.
    pub fn load(mut store: S) -> Self {
        let scores = match store.load() {
            Ok(scores) => {
                log::debug!("Loaded high scores");
                scores
            }
            Err(err) => {
                if err.is_not_found() {
                    log::info!("No high scores saved yet, starting fresh");
                } else {
                    log::warn!("Could not load high scores, starting fresh: {}", err);
                }
                let scores = HighScores::new();
                if let Err(err) = store.save(&scores) {
                    log::error!("Could not reset high scores: {}", err);
                }
                scores
            }
        };

        Self { scores, store }
    }

    pub fn record(&mut self, difficulty: Difficulty, seconds: u32) -> Recorded {
        let rank = self.scores.insert(difficulty, seconds);
        log::debug!(
            "Recorded {}s for {}, rank: {:?}",
            seconds,
            difficulty,
            rank
        );

        let saved = self.store.save(&self.scores);
        if let Err(err) = &saved {
            log::error!("Could not save high scores: {}", err);
        }

        Recorded { rank, saved }
    }

    pub fn top_entries(&self, difficulty: Difficulty, n: usize) -> &[u32] {
        self.scores.top_entries(difficulty, n)
    }

    pub fn scores(&self) -> &HighScores {
        &self.scores
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger() -> Ledger<MemoryStore> {
        Ledger::load(MemoryStore::default())
    }

    #[test]
    fn records_keep_ascending_order() {
        let mut ledger = ledger();

        for seconds in [30, 45, 10] {
            ledger.record(Difficulty::Beginner, seconds).into_result().unwrap();
        }

        assert_eq!(ledger.top_entries(Difficulty::Beginner, MAX_ENTRIES), [10, 30, 45]);
        assert!(ledger.top_entries(Difficulty::Expert, MAX_ENTRIES).is_empty());
    }

    #[test]
    fn list_is_capped_at_ten() {
        let mut ledger = ledger();
        for seconds in 1..=10 {
            ledger.record(Difficulty::Intermediate, seconds * 10);
        }
        let full: Vec<u32> = (1..=10).map(|s| s * 10).collect();

        let recorded = ledger.record(Difficulty::Intermediate, 500);

        assert_eq!(recorded.rank, None);
        assert_eq!(ledger.top_entries(Difficulty::Intermediate, MAX_ENTRIES), full);

        let recorded = ledger.record(Difficulty::Intermediate, 5);
        assert_eq!(recorded.rank, Some(1));
        assert_eq!(ledger.top_entries(Difficulty::Intermediate, 20).len(), MAX_ENTRIES);
        assert_eq!(ledger.top_entries(Difficulty::Intermediate, 20)[9], 90);
    }

    #[test]
    fn ranks_account_for_ties() {
        let mut ledger = ledger();
        assert_eq!(ledger.record(Difficulty::Expert, 50).rank, Some(1));
        assert_eq!(ledger.record(Difficulty::Expert, 20).rank, Some(1));
        assert_eq!(ledger.record(Difficulty::Expert, 50).rank, Some(3));
        assert_eq!(ledger.record(Difficulty::Expert, 30).rank, Some(2));
    }

    #[test]
    fn tie_at_the_cut_does_not_rank() {
        let mut ledger = ledger();
        for _ in 0..MAX_ENTRIES {
            ledger.record(Difficulty::Beginner, 60);
        }

        assert_eq!(ledger.record(Difficulty::Beginner, 60).rank, None);
        assert_eq!(ledger.top_entries(Difficulty::Beginner, MAX_ENTRIES), [60; MAX_ENTRIES]);
    }

    #[test]
    fn top_entries_truncates_to_n() {
        let mut ledger = ledger();
        for seconds in [5, 3, 9, 1] {
            ledger.record(Difficulty::Beginner, seconds);
        }

        assert_eq!(ledger.top_entries(Difficulty::Beginner, 2), [1, 3]);
        assert_eq!(ledger.top_entries(Difficulty::Beginner, 0), [0u32; 0]);
    }

    #[test]
    fn every_record_is_persisted() {
        let mut ledger = ledger();
        ledger.record(Difficulty::Beginner, 12);

        let reloaded = Ledger::load(ledger.store().clone());

        assert_eq!(reloaded.scores(), ledger.scores());
    }

    #[test]
    fn missing_storage_is_rewritten_empty() {
        let ledger = ledger();

        assert!(ledger.scores().is_empty());
        assert_eq!(
            ledger.store().document(),
            Some(r#"{"Beginner":[],"Intermediate":[],"Expert":[]}"#)
        );
    }

    #[test]
    fn corrupt_storage_loads_empty() {
        for document in ["not json", "[1, 2]", r#"{"Beginner": [-5]}"#, ""] {
            let ledger = Ledger::load(MemoryStore::with_document(document));

            assert!(ledger.scores().is_empty(), "document {:?}", document);
            assert_eq!(ledger.store().document().map(str::len), Some(45));
        }
    }

    #[test]
    fn loading_normalizes_entries() {
        let document = r#"{"Expert": [90, 12, 40, 1, 2, 3, 4, 5, 6, 7, 8, 9], "Custom": [1]}"#;

        let ledger = Ledger::load(MemoryStore::with_document(document));

        assert_eq!(
            ledger.top_entries(Difficulty::Expert, MAX_ENTRIES),
            [1, 2, 3, 4, 5, 6, 7, 8, 9, 12]
        );
        assert!(ledger.top_entries(Difficulty::Beginner, MAX_ENTRIES).is_empty());
    }

    #[test]
    fn failed_save_keeps_time_in_memory() {
        let mut ledger = Ledger::load(MemoryStore::read_only());

        let recorded = ledger.record(Difficulty::Beginner, 33);

        assert_eq!(recorded.rank, Some(1));
        assert!(recorded.saved.is_err());
        assert_eq!(ledger.top_entries(Difficulty::Beginner, MAX_ENTRIES), [33]);
    }
}
