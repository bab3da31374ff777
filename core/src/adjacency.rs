use ndarray::Array2;

use crate::*;

/// Counts, for every cell, how many of its Moore neighbors hold a mine.
///
/// Mine cells get a count as well, callers must ignore it. Fails with
/// [`GameError::GridTooLarge`] if an axis does not fit a [`Coord`].
pub fn compute_counts(mine_mask: &Array2<bool>) -> Result<Array2<u8>> {
    let (rows, cols) = mine_mask.dim();
    let (Ok(row_count), Ok(col_count)) = (Coord::try_from(rows), Coord::try_from(cols)) else {
        return Err(GameError::GridTooLarge { rows, cols });
    };
    Ok(counts_within(mine_mask, (row_count, col_count)))
}

/// `size` must be the dimensions of `mine_mask`.
pub(crate) fn counts_within(mine_mask: &Array2<bool>, (rows, cols): Pos) -> Array2<u8> {
    let mut counts = Array2::zeros(mine_mask.raw_dim());

    for row in 0..rows {
        for col in 0..cols {
            if !mine_mask[(row, col).to_nd_index()] {
                continue;
            }
            for neighbor in Neighbors::new((row, col), (rows, cols)) {
                counts[neighbor.to_nd_index()] += 1;
            }
        }
    }

    counts
}
