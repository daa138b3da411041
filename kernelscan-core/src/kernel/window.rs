use crate::foundation::{
    core::{Coord, GridDims},
    error::{KernelScanError, KernelScanResult},
    math::clamp_index,
};

/// The neighborhood of one grid position.
///
/// `neighbors` always holds exactly `kernel_size²` coordinates in row-major window order
/// (top-left to bottom-right). Offsets that fall outside the grid are replaced by the nearest
/// in-bounds row/column, so edge cells repeat.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct KernelWindow {
    /// Scan position the window is centered on.
    pub center: Coord,
    /// Window cells, clamped into the grid.
    pub neighbors: Vec<Coord>,
}

impl KernelWindow {
    /// Kernel width/height this window was resolved with.
    pub fn kernel_size(&self) -> usize {
        self.neighbors.len().isqrt()
    }
}

/// Check that `kernel_size` is odd, positive, and fits inside `dims`.
pub fn validate_kernel_size(kernel_size: usize, dims: GridDims) -> KernelScanResult<()> {
    let fail = |reason| KernelScanError::InvalidKernelSize {
        kernel_size,
        rows: dims.rows(),
        cols: dims.cols(),
        reason,
    };
    if kernel_size == 0 {
        return Err(fail("kernel size must be positive"));
    }
    if kernel_size % 2 == 0 {
        return Err(fail("kernel size must be odd"));
    }
    if kernel_size > dims.rows() || kernel_size > dims.cols() {
        return Err(fail("kernel size exceeds grid dimensions"));
    }
    Ok(())
}

/// Resolves kernel windows for a fixed kernel size and grid shape.
///
/// The relative offset table is built once; [`WindowResolver::resolve`] only clamps.
#[derive(Clone, Debug)]
pub struct WindowResolver {
    dims: GridDims,
    kernel_size: usize,
    offsets: Vec<(isize, isize)>,
}

impl WindowResolver {
    /// Validates `kernel_size` against `dims` and builds the offset table.
    pub fn new(kernel_size: usize, dims: GridDims) -> KernelScanResult<Self> {
        validate_kernel_size(kernel_size, dims)?;
        let k = (kernel_size / 2) as isize;
        let offsets = (-k..=k)
            .flat_map(|dr| (-k..=k).map(move |dc| (dr, dc)))
            .collect();
        Ok(Self {
            dims,
            kernel_size,
            offsets,
        })
    }

    /// Grid shape windows are clamped to.
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Kernel width/height.
    pub fn kernel_size(&self) -> usize {
        self.kernel_size
    }

    /// Window around `center`; fails with `Validation` when `center` is outside the grid.
    pub fn resolve(&self, center: Coord) -> KernelScanResult<KernelWindow> {
        if !self.dims.contains(center) {
            return Err(KernelScanError::validation(format!(
                "window center ({}, {}) is outside the {}x{} grid",
                center.row, center.col, self.dims.rows(), self.dims.cols()
            )));
        }
        let neighbors = self
            .offsets
            .iter()
            .map(|&(dr, dc)| {
                Coord::new(
                    clamp_index(center.row as isize + dr, self.dims.rows()),
                    clamp_index(center.col as isize + dc, self.dims.cols()),
                )
            })
            .collect();
        Ok(KernelWindow { center, neighbors })
    }
}

/// One-off window resolution; prefer [`WindowResolver`] when resolving many centers.
pub fn resolve_window(
    center: Coord,
    kernel_size: usize,
    dims: GridDims,
) -> KernelScanResult<KernelWindow> {
    WindowResolver::new(kernel_size, dims)?.resolve(center)
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/window.rs"]
mod tests;
