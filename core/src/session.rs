use chrono::{DateTime, Utc};
use rand::Rng;

use crate::*;

/// One game on a named difficulty, wired to the ledger that receives the
/// winning time.
#[derive(Debug)]
pub struct Session<'l, S> {
    difficulty: Difficulty,
    board: Board,
    ledger: &'l mut Ledger<S>,
}

/// Result of a reveal made through a [`Session`].
#[derive(Debug)]
pub struct Turn {
    pub result: RevealResult,
    /// Present only on the move that won the game.
    pub recorded: Option<Recorded>,
}

impl<'l, S: ScoreStore> Session<'l, S> {
    pub fn new<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R, ledger: &'l mut Ledger<S>) -> Self {
        log::debug!("New {} game", difficulty);
        Self {
            difficulty,
            board: Board::new(difficulty.config(), rng),
            ledger,
        }
    }

    /// Wraps an existing board. Its dimensions and mine count must be those
    /// of `difficulty`, otherwise its time would land in the wrong tier.
    pub fn with_board(difficulty: Difficulty, board: Board, ledger: &'l mut Ledger<S>) -> Result<Self> {
        if board.config() != difficulty.config() {
            return Err(GameError::DifficultyMismatch(difficulty));
        }
        log::debug!("New {} game on a prepared board", difficulty);
        Ok(Self {
            difficulty,
            board,
            ledger,
        })
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn ledger(&self) -> &Ledger<S> {
        self.ledger
    }

    /// Throws the current board away and deals a new one.
    pub fn restart<R: Rng + ?Sized>(&mut self, difficulty: Difficulty, rng: &mut R) {
        log::debug!("New {} game", difficulty);
        self.difficulty = difficulty;
        self.board = Board::new(difficulty.config(), rng);
    }

    pub fn toggle_flag(&mut self, pos: Pos) -> MarkOutcome {
        self.board.toggle_flag(pos)
    }

    pub fn reveal(&mut self, pos: Pos) -> Turn {
        self.reveal_at(pos, Utc::now())
    }

    pub fn reveal_at(&mut self, pos: Pos, now: DateTime<Utc>) -> Turn {
        let result = self.board.reveal_at(pos, now);
        let recorded = matches!(result.outcome, RevealOutcome::Won).then(|| {
            let seconds = self.board.elapsed_seconds(now);
            self.ledger.record(self.difficulty, seconds)
        });

        Turn { result, recorded }
    }
}
