/// Player-facing state stored per cell by the board. A cell is never both
/// revealed and flagged.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum CellState {
    #[default]
    Hidden,
    Flagged,
    Revealed(u8),
    /// The mine that ended the game.
    Exploded,
}

impl CellState {
    pub(crate) const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_) | Self::Exploded)
    }
}

/// What a front end may show for one cell.
///
/// Mine locations of unopened cells only appear once the game is lost.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    TriggeredMine,
    /// Unflagged mine, shown after a loss.
    Mine,
    /// Flag on a safe cell, shown after a loss.
    Misflagged,
}

impl CellView {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_) | Self::TriggeredMine)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged | Self::Misflagged)
    }

    pub const fn is_mine(self) -> Option<bool> {
        use CellView::*;
        match self {
            Hidden | Flagged => None,
            Revealed(_) | Misflagged => Some(false),
            TriggeredMine | Mine => Some(true),
        }
    }

    pub const fn adjacent_mine_count(self) -> Option<u8> {
        match self {
            Self::Revealed(count) => Some(count),
            _ => None,
        }
    }
}
