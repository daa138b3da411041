use rayon::prelude::*;

use crate::{
    foundation::error::{KernelScanError, KernelScanResult},
    grid::model::{DerivedGrid, Grid},
    kernel::window::WindowResolver,
    reduce::operator::ReductionOperator,
};

/// Worker configuration for the reduction pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ReduceThreading {
    /// Compute positions on a dedicated rayon pool.
    pub parallel: bool,
    /// Override rayon worker threads (parallel mode only). `None` uses rayon defaults.
    pub threads: Option<usize>,
}

impl ReduceThreading {
    /// `threads` must be at least 1 when set.
    pub fn validate(&self) -> KernelScanResult<()> {
        if let Some(n) = self.threads
            && n == 0
        {
            return Err(KernelScanError::validation(
                "reduce threading 'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }
}

/// Applies a windowed reduction operator to every position of a grid.
///
/// Each position depends only on its own window, so positions may be computed in any order or
/// concurrently. Results are always stored by scan index, and when several positions fail the
/// error reported is the one with the lowest scan index, so output never depends on scheduling.
#[derive(Clone, Debug, Default)]
pub struct ReductionEngine {
    threading: ReduceThreading,
}

impl ReductionEngine {
    /// Engine with the given threading options.
    pub fn new(threading: ReduceThreading) -> Self {
        Self { threading }
    }

    /// Threading options.
    pub fn threading(&self) -> &ReduceThreading {
        &self.threading
    }

    /// Reduce every window of `grid`, producing a grid of identical shape.
    ///
    /// A position whose center sample is missing yields a missing result without calling the
    /// operator. Otherwise missing neighbors are dropped before reduction.
    #[tracing::instrument(
        skip(self, grid, op),
        fields(rows = grid.rows(), cols = grid.cols(), operator = op.name())
    )]
    pub fn reduce_all(
        &self,
        grid: &Grid,
        kernel_size: usize,
        op: &dyn ReductionOperator,
    ) -> KernelScanResult<DerivedGrid> {
        self.threading.validate()?;
        let resolver = WindowResolver::new(kernel_size, grid.dims())?;
        let n = grid.dims().cell_count();

        let values = if self.threading.parallel {
            let pool = build_thread_pool(self.threading.threads)?;
            let results = pool.install(|| {
                (0..n)
                    .into_par_iter()
                    .map(|idx| reduce_position(grid, &resolver, op, idx))
                    .collect::<Vec<_>>()
            });
            results.into_iter().collect::<KernelScanResult<Vec<f64>>>()?
        } else {
            (0..n)
                .map(|idx| reduce_position(grid, &resolver, op, idx))
                .collect::<KernelScanResult<Vec<f64>>>()?
        };

        tracing::debug!(
            positions = n,
            parallel = self.threading.parallel,
            "reduction pass complete"
        );
        DerivedGrid::new(grid.dims(), values)
    }
}

fn reduce_position(
    grid: &Grid,
    resolver: &WindowResolver,
    op: &dyn ReductionOperator,
    idx: usize,
) -> KernelScanResult<f64> {
    let dims = grid.dims();
    let cells = grid.values();
    if cells[idx].is_nan() {
        return Ok(f64::NAN);
    }

    let center = dims.coord_of(idx);
    let window = resolver.resolve(center)?;
    let values: Vec<f64> = window
        .neighbors
        .iter()
        .map(|&c| cells[dims.index_of(c)])
        .filter(|v| !v.is_nan())
        .collect();

    let fail = |message: String| KernelScanError::OperatorComputation {
        coord: center,
        operator: op.name().to_string(),
        message,
    };
    let out = op.reduce(&values).map_err(|e| fail(format!("{e:#}")))?;
    if !out.is_finite() {
        return Err(fail(format!("operator returned non-finite value {out}")));
    }
    Ok(out)
}

fn build_thread_pool(threads: Option<usize>) -> KernelScanResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder.build().map_err(|e| {
        KernelScanError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}"))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/reduce/engine.rs"]
mod tests;
