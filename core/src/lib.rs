//! Board state machine for a single-player Minesweeper game, together with the
//! persisted high-score ledger.
//!
//! Front ends drive a [`Board`] through [`Board::reveal`] and
//! [`Board::toggle_flag`], render it through [`Board::cell_view`], and forward
//! winning times to a [`Ledger`], usually through a [`Session`].

use std::collections::BTreeSet;
use std::ops::Index;

use ndarray::Array2;

pub use adjacency::*;
pub use difficulty::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use ledger::*;
pub use session::*;
pub use tile::*;
pub use types::*;

mod adjacency;
mod difficulty;
mod engine;
mod error;
mod generator;
mod ledger;
mod session;
mod tile;
mod types;

/// Board dimensions and mine count. Always satisfies
/// `rows > 0`, `cols > 0` and `mines < rows * cols`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GameConfig {
    size: Pos,
    mines: CellCount,
}

impl GameConfig {
    pub(crate) const fn new_unchecked(size: Pos, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        if rows == 0 || cols == 0 || mines >= area(rows, cols) {
            return Err(GameError::InvalidParameters { rows, cols, mines });
        }
        Ok(Self::new_unchecked((rows, cols), mines))
    }

    pub const fn size(&self) -> Pos {
        self.size
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn cols(&self) -> Coord {
        self.size.1
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        area(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }

    pub const fn contains(&self, (row, col): Pos) -> bool {
        row < self.size.0 && col < self.size.1
    }
}

/// Fixed placement of mines together with the adjacency counts derived from it.
#[derive(Clone, Debug, PartialEq)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    counts: Array2<u8>,
    config: GameConfig,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        let (Ok(rows), Ok(cols)) = (Coord::try_from(rows), Coord::try_from(cols)) else {
            return Err(GameError::GridTooLarge { rows, cols });
        };
        // at most rows * cols, which always fits
        let mines = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        let config = GameConfig::new(rows, cols, mines)?;
        let counts = counts_within(&mine_mask, config.size());

        Ok(Self {
            mine_mask,
            counts,
            config,
        })
    }

    pub fn from_mine_coords(config_size: Pos, mine_coords: &[Pos]) -> Result<Self> {
        let (rows, cols) = config_size;
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidParameters {
                rows,
                cols,
                mines: 0,
            });
        }

        let mut mine_mask: Array2<bool> = Array2::default(config_size.to_nd_index());
        for &pos in mine_coords {
            if pos.0 >= rows || pos.1 >= cols {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[pos.to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    pub fn game_config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Pos {
        self.config.size()
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines()
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.config.safe_cells()
    }

    pub fn contains_mine(&self, pos: Pos) -> bool {
        self[pos]
    }

    /// Mines among the Moore neighbors of `pos`. Not meaningful for mine cells.
    pub fn adjacent_mine_count(&self, pos: Pos) -> u8 {
        self.counts[pos.to_nd_index()]
    }

    pub fn mine_positions(&self) -> BTreeSet<Pos> {
        self.positions().filter(|&pos| self[pos]).collect()
    }

    /// Every cell position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + use<> {
        let (rows, cols) = self.size();
        (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }
}

impl Index<Pos> for MineLayout {
    type Output = bool;

    fn index(&self, pos: Pos) -> &Self::Output {
        &self.mine_mask[pos.to_nd_index()]
    }
}

/// Why a move left the board untouched.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    OutOfBounds,
    GameOver,
    AlreadyRevealed,
    Flagged,
    /// Every available flag is already placed.
    FlagLimit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange(Rejection),
    Flagged,
    Unflagged,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange(_))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange(Rejection),
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange(_))
    }
}

/// A safe cell opened by a reveal, with the number shown on it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RevealedCell {
    pub pos: Pos,
    pub adjacent_mines: u8,
}

/// Full picture handed out when a mine goes off.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LossReport {
    pub triggered: Pos,
    pub mines: BTreeSet<Pos>,
    /// Flagged cells that turned out not to hold a mine.
    pub wrong_flags: BTreeSet<Pos>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealResult {
    pub outcome: RevealOutcome,
    pub revealed: Vec<RevealedCell>,
    pub loss: Option<LossReport>,
}

impl RevealResult {
    pub(crate) fn no_change(rejection: Rejection) -> Self {
        Self {
            outcome: RevealOutcome::NoChange(rejection),
            revealed: Vec::new(),
            loss: None,
        }
    }

    pub fn has_update(&self) -> bool {
        self.outcome.has_update()
    }
}
