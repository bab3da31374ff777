use ndarray::Array2;

/// Single grid axis, used for row/column indices and board dimensions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Cell position as `(row, col)`.
pub type Pos = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Pos {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn area(rows: Coord, cols: Coord) -> CellCount {
    (rows as CellCount) * (cols as CellCount)
}

pub trait NeighborIterExt {
    fn neighbors(&self, pos: Pos) -> Neighbors;
}

impl<T> NeighborIterExt for Array2<T> {
    fn neighbors(&self, pos: Pos) -> Neighbors {
        Neighbors::within(pos, self.dim())
    }
}

/// Moore neighborhood offsets as `(d_row, d_col)`.
const OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// In-bounds cells of the Moore neighborhood around a center cell.
#[derive(Debug, Clone)]
pub struct Neighbors {
    center: [usize; 2],
    dim: (usize, usize),
    offsets: std::slice::Iter<'static, (isize, isize)>,
}

impl Neighbors {
    pub fn new(center: Pos, (rows, cols): Pos) -> Self {
        Self::within(center, (rows.into(), cols.into()))
    }

    fn within(center: Pos, dim: (usize, usize)) -> Self {
        Self {
            center: center.to_nd_index(),
            dim,
            offsets: OFFSETS.iter(),
        }
    }
}

impl Iterator for Neighbors {
    type Item = Pos;

    fn next(&mut self) -> Option<Self::Item> {
        let [row, col] = self.center;
        let (rows, cols) = self.dim;
        self.offsets.find_map(|&(d_row, d_col)| {
            let row = row.checked_add_signed(d_row).filter(|&row| row < rows)?;
            let col = col.checked_add_signed(d_col).filter(|&col| col < cols)?;
            Some((Coord::try_from(row).ok()?, Coord::try_from(col).ok()?))
        })
    }
}
