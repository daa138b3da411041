use crate::{
    foundation::error::KernelScanResult,
    grid::model::{DerivedGrid, Grid, NormalizedGrid},
    pipeline::config::ScanConfig,
    reduce::{engine::ReductionEngine, operator::ReductionOperator},
    timeline::{sequencer::TimelineSequencer, step::Timeline},
};

/// Everything a renderer needs to play back a scan.
#[derive(Clone, Debug, serde::Serialize)]
pub struct ScanOutput {
    /// Animation steps in playback order.
    pub timeline: Timeline,
    /// Source grid colors.
    pub source: NormalizedGrid,
    /// Reduced grid colors, on the source grid's scale.
    pub result: NormalizedGrid,
    /// Raw reduced values.
    #[serde(skip)]
    pub derived: DerivedGrid,
}

/// Reduce `grid` with the configured built-in operator and assemble its timeline.
///
/// Pipeline:
/// 1. [`ReductionEngine::reduce_all`] (optionally parallel)
/// 2. [`Grid::normalize`] / [`Grid::normalize_derived`] on the shared scale
/// 3. [`TimelineSequencer::build`] (single pass, row-major)
///
/// Either the full output is produced or the first error is returned.
pub fn run_scan(grid: &Grid, config: &ScanConfig) -> KernelScanResult<ScanOutput> {
    run_scan_with_operator(grid, config, &config.operator)
}

/// Like [`run_scan`], with a caller-supplied operator instead of `config.operator`.
#[tracing::instrument(
    skip(grid, config, op),
    fields(
        rows = grid.rows(),
        cols = grid.cols(),
        kernel_size = config.kernel_size,
        operator = op.name()
    )
)]
pub fn run_scan_with_operator(
    grid: &Grid,
    config: &ScanConfig,
    op: &dyn ReductionOperator,
) -> KernelScanResult<ScanOutput> {
    let pacing = config.checked_pacing()?;

    let derived = ReductionEngine::new(config.threading.clone()).reduce_all(
        grid,
        config.kernel_size,
        op,
    )?;
    let source = grid.normalize();
    let result = grid.normalize_derived(&derived)?;
    let timeline = TimelineSequencer::new(pacing).build(config.kernel_size, &result)?;

    tracing::info!(
        steps = timeline.len(),
        total_duration = timeline.total_duration(),
        "scan complete"
    );
    Ok(ScanOutput {
        timeline,
        source,
        result,
        derived,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/run.rs"]
mod tests;
