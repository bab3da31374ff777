use std::collections::{BTreeSet, VecDeque};

use chrono::{DateTime, Utc};
use ndarray::Array2;
use rand::Rng;

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum GameStatus {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// A single game from construction to win or loss.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    layout: MineLayout,
    cells: Array2<CellState>,
    flags_placed: CellCount,
    status: GameStatus,
    triggered_mine: Option<Pos>,
    started_at: Option<DateTime<Utc>>,
    final_elapsed: Option<u32>,
}

impl Board {
    /// Places mines for `config` with `rng` and derives all adjacency counts.
    pub fn new<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Self {
        Self::generate(config, &mut RandomMinefieldGenerator::new(rng))
    }

    pub fn generate<G: MinefieldGenerator + ?Sized>(config: GameConfig, generator: &mut G) -> Self {
        Self::from_layout(generator.generate(config))
    }

    pub fn from_layout(layout: MineLayout) -> Self {
        let size = layout.size();
        Self {
            layout,
            cells: Array2::default(size.to_nd_index()),
            flags_placed: 0,
            status: GameStatus::default(),
            triggered_mine: None,
            started_at: None,
            final_elapsed: None,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.layout.game_config()
    }

    pub fn size(&self) -> Pos {
        self.layout.size()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn flags_placed(&self) -> CellCount {
        self.flags_placed
    }

    /// Mines left for the counter display; flags are a player aid, not ground truth.
    pub fn remaining_mine_count(&self) -> CellCount {
        self.layout.mine_count() - self.flags_placed
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn triggered_mine(&self) -> Option<Pos> {
        self.triggered_mine
    }

    /// Whole seconds since the first reveal, frozen once the game is over.
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> u32 {
        if let Some(elapsed) = self.final_elapsed {
            return elapsed;
        }
        self.started_at
            .map_or(0, |started_at| seconds_between(started_at, now))
    }

    /// The mine layout, only available after a loss.
    pub fn revealed_layout(&self) -> Option<&MineLayout> {
        matches!(self.status, GameStatus::Lost).then_some(&self.layout)
    }

    pub fn is_won(&self) -> bool {
        is_won(self)
    }

    pub fn cell_view(&self, pos: Pos) -> Option<CellView> {
        let state = *self.cells.get(pos.to_nd_index())?;
        let lost = matches!(self.status, GameStatus::Lost);

        Some(match state {
            CellState::Hidden if lost && self.layout.contains_mine(pos) => CellView::Mine,
            CellState::Hidden => CellView::Hidden,
            CellState::Flagged if lost && !self.layout.contains_mine(pos) => CellView::Misflagged,
            CellState::Flagged => CellView::Flagged,
            CellState::Revealed(count) => CellView::Revealed(count),
            CellState::Exploded => CellView::TriggeredMine,
        })
    }

    pub fn toggle_flag(&mut self, pos: Pos) -> MarkOutcome {
        use MarkOutcome::*;

        if let Err(rejection) = self.check_playable(pos) {
            return NoChange(rejection);
        }

        match self.cells[pos.to_nd_index()] {
            CellState::Hidden if self.flags_placed >= self.layout.mine_count() => {
                NoChange(Rejection::FlagLimit)
            }
            CellState::Hidden => {
                self.cells[pos.to_nd_index()] = CellState::Flagged;
                self.flags_placed += 1;
                Flagged
            }
            CellState::Flagged => {
                self.cells[pos.to_nd_index()] = CellState::Hidden;
                self.flags_placed -= 1;
                Unflagged
            }
            CellState::Revealed(_) | CellState::Exploded => NoChange(Rejection::AlreadyRevealed),
        }
    }

    pub fn reveal(&mut self, pos: Pos) -> RevealResult {
        self.reveal_at(pos, Utc::now())
    }

    /// Opens the cell at `pos` as of `now`, cascading through zero cells.
    ///
    /// Revealing a flagged or already opened cell, or any cell after the game
    /// ended, leaves the board untouched.
    pub fn reveal_at(&mut self, pos: Pos, now: DateTime<Utc>) -> RevealResult {
        if let Err(rejection) = self.check_playable(pos) {
            return RevealResult::no_change(rejection);
        }

        match self.cells[pos.to_nd_index()] {
            CellState::Hidden => {}
            CellState::Flagged => return RevealResult::no_change(Rejection::Flagged),
            CellState::Revealed(_) | CellState::Exploded => {
                return RevealResult::no_change(Rejection::AlreadyRevealed);
            }
        }

        self.mark_started(now);

        if self.layout.contains_mine(pos) {
            log::debug!("Mine hit at {:?}", pos);
            self.cells[pos.to_nd_index()] = CellState::Exploded;
            self.triggered_mine = Some(pos);
            self.end_game(GameStatus::Lost, now);
            return RevealResult {
                outcome: RevealOutcome::HitMine,
                revealed: Vec::new(),
                loss: Some(self.loss_report(pos)),
            };
        }

        let revealed = self.flood_reveal(pos);
        log::debug!("Reveal at {:?} opened {} cells", pos, revealed.len());

        let outcome = if is_won(self) {
            self.end_game(GameStatus::Won, now);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        };

        RevealResult {
            outcome,
            revealed,
            loss: None,
        }
    }

    /// Opens `start` and, through an explicit worklist, every hidden cell
    /// reachable over zero-count cells. Flags are never crossed.
    fn flood_reveal(&mut self, start: Pos) -> Vec<RevealedCell> {
        let mut revealed = Vec::new();
        let mut queued = BTreeSet::from([start]);
        let mut to_visit = VecDeque::from([start]);

        while let Some(pos) = to_visit.pop_front() {
            if !matches!(self.cells[pos.to_nd_index()], CellState::Hidden) {
                log::trace!("Skipping cell at {:?}", pos);
                continue;
            }

            let adjacent_mines = self.layout.adjacent_mine_count(pos);
            self.cells[pos.to_nd_index()] = CellState::Revealed(adjacent_mines);
            revealed.push(RevealedCell {
                pos,
                adjacent_mines,
            });
            log::trace!("Opened cell at {:?}, mine count: {}", pos, adjacent_mines);

            if adjacent_mines == 0 {
                for next in self.cells.neighbors(pos) {
                    if matches!(self.cells[next.to_nd_index()], CellState::Hidden)
                        && queued.insert(next)
                    {
                        to_visit.push_back(next);
                    }
                }
            }
        }

        revealed
    }

    fn loss_report(&self, triggered: Pos) -> LossReport {
        let wrong_flags = self
            .layout
            .positions()
            .filter(|&pos| {
                matches!(self.cells[pos.to_nd_index()], CellState::Flagged)
                    && !self.layout.contains_mine(pos)
            })
            .collect();

        LossReport {
            triggered,
            mines: self.layout.mine_positions(),
            wrong_flags,
        }
    }

    fn mark_started(&mut self, now: DateTime<Utc>) {
        if self.started_at.is_none() {
            log::debug!("started at {}", now);
            self.started_at = Some(now);
        }
    }

    fn end_game(&mut self, status: GameStatus, now: DateTime<Utc>) {
        if self.status.is_finished() {
            return;
        }
        self.status = status;
        self.final_elapsed = Some(self.elapsed_seconds(now));
        log::debug!("ended at {} as {:?}", now, status);
    }

    fn check_playable(&self, pos: Pos) -> core::result::Result<(), Rejection> {
        if !self.layout.game_config().contains(pos) {
            Err(Rejection::OutOfBounds)
        } else if self.status.is_finished() {
            Err(Rejection::GameOver)
        } else {
            Ok(())
        }
    }

    pub(crate) fn cell_state(&self, pos: Pos) -> CellState {
        self.cells[pos.to_nd_index()]
    }

    pub(crate) fn layout(&self) -> &MineLayout {
        &self.layout
    }
}

/// True iff every safe cell is revealed. Flags play no part.
pub fn is_won(board: &Board) -> bool {
    let layout = board.layout();
    layout
        .positions()
        .all(|pos| layout.contains_mine(pos) || board.cell_state(pos).is_revealed())
}

fn seconds_between(start: DateTime<Utc>, end: DateTime<Utc>) -> u32 {
    (end - start).num_seconds().clamp(0, u32::MAX.into()) as u32
}
