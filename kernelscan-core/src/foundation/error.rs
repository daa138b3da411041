use crate::foundation::core::Coord;

/// Convenience result type used across kernelscan.
pub type KernelScanResult<T> = Result<T, KernelScanError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every variant is fatal to the request that produced it: no partial timeline is ever returned.
#[derive(thiserror::Error, Debug)]
pub enum KernelScanError {
    /// Empty, ragged, or unscalable source grid.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    /// Kernel size that is even, zero, or larger than the grid.
    #[error("invalid kernel size {kernel_size} for {rows}x{cols} grid: {reason}")]
    InvalidKernelSize {
        /// Requested kernel width/height.
        kernel_size: usize,
        /// Grid rows.
        rows: usize,
        /// Grid columns.
        cols: usize,
        /// Which constraint was violated.
        reason: &'static str,
    },

    /// A reduction operator failed or produced a non-finite value for one window.
    #[error("operator '{operator}' failed at ({}, {}): {message}", .coord.row, .coord.col)]
    OperatorComputation {
        /// Window center whose reduction failed.
        coord: Coord,
        /// Operator name.
        operator: String,
        /// Operator-provided failure description.
        message: String,
    },

    /// Invalid configuration or out-of-range argument.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KernelScanError {
    /// Build a [`KernelScanError::InvalidGrid`] value.
    pub fn invalid_grid(msg: impl Into<String>) -> Self {
        Self::InvalidGrid(msg.into())
    }

    /// Build a [`KernelScanError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`KernelScanError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
