use std::collections::BTreeSet;

use rand::Rng;

use crate::*;
pub use random::*;

mod random;

pub trait MinefieldGenerator {
    fn generate(&mut self, config: GameConfig) -> MineLayout;
}

/// Draws `mines` distinct cells uniformly, without replacement, from a
/// `rows x cols` grid.
///
/// There is no first-click safety: any cell may receive a mine, including the
/// one the player ends up opening first.
pub fn place_mines<R: Rng + ?Sized>(
    rows: Coord,
    cols: Coord,
    mines: CellCount,
    rng: &mut R,
) -> Result<BTreeSet<Pos>> {
    let config = GameConfig::new(rows, cols, mines)?;
    Ok(sample_positions(config, rng))
}

pub(crate) fn sample_positions<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> BTreeSet<Pos> {
    let cols = usize::from(config.cols());
    rand::seq::index::sample(
        rng,
        config.total_cells().into(),
        config.mines().into(),
    )
    .into_iter()
    // row-major cell index, bounded by the config
    .map(|index| ((index / cols) as Coord, (index % cols) as Coord))
    .collect()
}
