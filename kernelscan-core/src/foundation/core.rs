use crate::foundation::error::{KernelScanError, KernelScanResult};

/// A `(row, col)` cell address inside a grid.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Coord {
    /// 0-based row.
    pub row: usize,
    /// 0-based column.
    pub col: usize,
}

impl Coord {
    /// Build a coordinate.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Grid bounds. Both dimensions are `>= 1`; the only way to obtain a value is [`GridDims::new`]
/// (deserialization goes through it too).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "GridDimsRepr")]
pub struct GridDims {
    rows: usize,
    cols: usize,
}

#[derive(serde::Deserialize)]
struct GridDimsRepr {
    rows: usize,
    cols: usize,
}

impl TryFrom<GridDimsRepr> for GridDims {
    type Error = KernelScanError;

    fn try_from(repr: GridDimsRepr) -> Result<Self, Self::Error> {
        Self::new(repr.rows, repr.cols)
    }
}

impl GridDims {
    /// Validate and build grid bounds.
    pub fn new(rows: usize, cols: usize) -> KernelScanResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(KernelScanError::invalid_grid(format!(
                "grid must have at least one cell (got {rows}x{cols})"
            )));
        }
        rows.checked_mul(cols)
            .ok_or_else(|| KernelScanError::invalid_grid("grid cell count overflows usize"))?;
        Ok(Self { rows, cols })
    }

    /// Number of rows.
    pub fn rows(self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(self) -> usize {
        self.cols
    }

    /// `rows * cols`; never zero.
    pub fn cell_count(self) -> usize {
        self.rows * self.cols
    }

    /// Whether `c` lies inside the bounds.
    pub fn contains(self, c: Coord) -> bool {
        c.row < self.rows && c.col < self.cols
    }

    /// Row-major linear index.
    pub fn index_of(self, c: Coord) -> usize {
        c.row * self.cols + c.col
    }

    /// Inverse of [`GridDims::index_of`].
    pub fn coord_of(self, index: usize) -> Coord {
        Coord::new(index / self.cols, index % self.cols)
    }

    /// Row-major scan order over every cell.
    pub fn scan(self) -> impl Iterator<Item = Coord> {
        (0..self.cell_count()).map(move |i| self.coord_of(i))
    }
}

/// Display color of a normalized cell, consumed by renderers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayColor {
    /// Grayscale intensity in `[0, 255]`.
    Gray(u8),
    /// Missing sample; renderers draw a fixed background.
    NoData,
}

impl DisplayColor {
    /// Straight (non-premultiplied) opaque RGBA8. `NoData` renders black.
    pub fn to_rgba8(self) -> [u8; 4] {
        match self {
            Self::Gray(v) => [v, v, v, 255],
            Self::NoData => [0, 0, 0, 255],
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
