use crate::foundation::{
    core::{Coord, DisplayColor, GridDims},
    error::{KernelScanError, KernelScanResult},
};

/// Immutable source grid.
///
/// `NaN` marks a missing sample. The normalization divisor (the grid's own maximum, ignoring
/// missing samples) is computed once here and shared with every grid derived from it, so source
/// and result colors stay on one scale.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    dims: GridDims,
    values: Vec<f64>, // row-major
    global_max: f64,
}

impl Grid {
    /// Build a grid from row-major values.
    pub fn new(rows: usize, cols: usize, values: Vec<f64>) -> KernelScanResult<Self> {
        let dims = GridDims::new(rows, cols)?;
        if values.len() != dims.cell_count() {
            return Err(KernelScanError::invalid_grid(format!(
                "expected {} values for a {rows}x{cols} grid, got {}",
                dims.cell_count(),
                values.len()
            )));
        }
        if let Some(idx) = values.iter().position(|v| v.is_infinite()) {
            let c = dims.coord_of(idx);
            return Err(KernelScanError::invalid_grid(format!(
                "infinite value at ({}, {})",
                c.row, c.col
            )));
        }

        let global_max = values
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
            .ok_or_else(|| KernelScanError::invalid_grid("grid has no samples (all values are NaN)"))?;
        if global_max <= 0.0 {
            return Err(KernelScanError::invalid_grid(format!(
                "global max must be > 0 to normalize (got {global_max})"
            )));
        }

        Ok(Self {
            dims,
            values,
            global_max,
        })
    }

    /// Build a grid from a list of equally sized rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> KernelScanResult<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if let Some(r) = rows.iter().position(|row| row.len() != n_cols) {
            return Err(KernelScanError::invalid_grid(format!(
                "row {r} has {} columns, expected {n_cols}",
                rows[r].len()
            )));
        }
        Self::new(n_rows, n_cols, rows.into_iter().flatten().collect())
    }

    /// Like [`Grid::from_rows`], with `None` standing for a missing sample (JSON `null`).
    pub fn from_nested_options(rows: Vec<Vec<Option<f64>>>) -> KernelScanResult<Self> {
        Self::from_rows(
            rows.into_iter()
                .map(|row| row.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
                .collect(),
        )
    }

    /// Shape of the grid.
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Row count.
    pub fn rows(&self) -> usize {
        self.dims.rows()
    }

    /// Column count.
    pub fn cols(&self) -> usize {
        self.dims.cols()
    }

    /// Largest non-missing sample; always `> 0`.
    pub fn global_max(&self) -> f64 {
        self.global_max
    }

    /// All samples in row-major order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Cell value, or `None` when `c` is outside the grid.
    pub fn get(&self, c: Coord) -> Option<f64> {
        cell_at(self.dims, &self.values, c)
    }

    /// Map every cell to its display color.
    pub fn normalize(&self) -> NormalizedGrid {
        self.normalize_values(&self.values)
    }

    /// Normalize a grid derived from this one, using this grid's scale.
    pub fn normalize_derived(&self, derived: &DerivedGrid) -> KernelScanResult<NormalizedGrid> {
        if derived.dims != self.dims {
            return Err(KernelScanError::invalid_grid(format!(
                "derived grid is {}x{}, source is {}x{}",
                derived.dims.rows(), derived.dims.cols(), self.dims.rows(), self.dims.cols()
            )));
        }
        Ok(self.normalize_values(&derived.values))
    }

    fn normalize_values(&self, values: &[f64]) -> NormalizedGrid {
        let cells = values
            .iter()
            .map(|&v| display_color(v, self.global_max))
            .collect();
        NormalizedGrid {
            dims: self.dims,
            cells,
        }
    }
}

fn cell_at<T: Copy>(dims: GridDims, cells: &[T], c: Coord) -> Option<T> {
    if !dims.contains(c) {
        return None;
    }
    cells.get(dims.index_of(c)).copied()
}

fn display_color(v: f64, global_max: f64) -> DisplayColor {
    if v.is_nan() {
        return DisplayColor::NoData;
    }
    // Operators are not guaranteed to stay within the source range.
    let intensity = (v / global_max * 255.0).clamp(0.0, 255.0);
    DisplayColor::Gray(intensity.round() as u8)
}

/// Grid produced by a reduction pass; same shape as its source, `NaN` for no-data cells.
#[derive(Clone, Debug, PartialEq)]
pub struct DerivedGrid {
    dims: GridDims,
    values: Vec<f64>,
}

impl DerivedGrid {
    /// Wrap row-major values; fails with `InvalidGrid` if the count does not match `dims`.
    pub fn new(dims: GridDims, values: Vec<f64>) -> KernelScanResult<Self> {
        if values.len() != dims.cell_count() {
            return Err(KernelScanError::invalid_grid(format!(
                "derived grid expects {} values, got {}",
                dims.cell_count(),
                values.len()
            )));
        }
        Ok(Self { dims, values })
    }

    /// Shape of the grid.
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Reduced values in row-major order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Cell value, or `None` when `c` is outside the grid.
    pub fn get(&self, c: Coord) -> Option<f64> {
        cell_at(self.dims, &self.values, c)
    }
}

/// Display colors for every cell of a grid, in row-major order.
///
/// Deserialization checks that `cells` holds exactly `rows × cols` entries.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "NormalizedGridRepr")]
pub struct NormalizedGrid {
    #[serde(flatten)]
    dims: GridDims,
    cells: Vec<DisplayColor>,
}

#[derive(serde::Deserialize)]
struct NormalizedGridRepr {
    #[serde(flatten)]
    dims: GridDims,
    cells: Vec<DisplayColor>,
}

impl TryFrom<NormalizedGridRepr> for NormalizedGrid {
    type Error = KernelScanError;

    fn try_from(repr: NormalizedGridRepr) -> Result<Self, Self::Error> {
        if repr.cells.len() != repr.dims.cell_count() {
            return Err(KernelScanError::invalid_grid(format!(
                "normalized grid expects {} cells, got {}",
                repr.dims.cell_count(),
                repr.cells.len()
            )));
        }
        Ok(Self {
            dims: repr.dims,
            cells: repr.cells,
        })
    }
}

impl NormalizedGrid {
    /// Shape of the grid.
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Colors in row-major order.
    pub fn cells(&self) -> &[DisplayColor] {
        &self.cells
    }

    /// Color of cell `c`, or `None` when `c` is outside the grid.
    pub fn get(&self, c: Coord) -> Option<DisplayColor> {
        cell_at(self.dims, &self.cells, c)
    }

    /// Opaque RGBA8 pixels, row-major, for image export.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.cells.iter().flat_map(|c| c.to_rgba8()).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/model.rs"]
mod tests;
