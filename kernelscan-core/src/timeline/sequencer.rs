use crate::{
    foundation::{
        core::{Coord, DisplayColor},
        error::{KernelScanError, KernelScanResult},
    },
    grid::model::NormalizedGrid,
    kernel::window::WindowResolver,
    timeline::{
        pacing::Pacing,
        step::{AnimationStep, Phase, Timeline},
    },
};

/// Turns precomputed reduction results into a watchable [`Timeline`].
///
/// Positions are visited in row-major scan order. Each position emits
/// `HighlightWindow`, `RevealResult`, then `AdvanceWindow` towards the next position, except the
/// last position which ends with `Complete` instead. The sequencer never touches raw values; it
/// only looks up colors in the already normalized result grid.
#[derive(Clone, Debug, Default)]
pub struct TimelineSequencer {
    pacing: Pacing,
}

impl TimelineSequencer {
    /// Sequencer with custom pacing.
    pub fn new(pacing: Pacing) -> Self {
        Self { pacing }
    }

    /// Pacing used for step durations.
    pub fn pacing(&self) -> &Pacing {
        &self.pacing
    }

    /// Build the full timeline for `result`.
    ///
    /// Fails with `InvalidKernelSize` when `kernel_size` does not fit `result`.
    #[tracing::instrument(
        skip(self, result),
        fields(rows = result.dims().rows(), cols = result.dims().cols())
    )]
    pub fn build(&self, kernel_size: usize, result: &NormalizedGrid) -> KernelScanResult<Timeline> {
        let dims = result.dims();
        let resolver = WindowResolver::new(kernel_size, dims)?;
        let n = dims.cell_count();
        let mut steps = Vec::with_capacity(n * 3);

        for p in 0..n {
            let center = dims.coord_of(p);
            let speed_factor = self.pacing.speed_factor(p);
            let mut emit = |phase: Phase, subjects: Vec<Coord>, color: Option<DisplayColor>| {
                steps.push(AnimationStep {
                    position: p,
                    phase,
                    subjects,
                    color,
                    duration: self.pacing.duration(phase, p),
                    speed_factor,
                });
            };

            let window = resolver.resolve(center)?;
            emit(Phase::HighlightWindow, window.neighbors, None);

            let color = result.get(center).ok_or_else(|| {
                KernelScanError::validation(format!(
                    "result grid has no cell at ({}, {})",
                    center.row, center.col
                ))
            })?;
            emit(Phase::RevealResult, vec![center], Some(color));

            if p + 1 < n {
                emit(Phase::AdvanceWindow, vec![center, dims.coord_of(p + 1)], None);
            } else {
                emit(Phase::Complete, vec![center], None);
            }
        }

        let timeline = Timeline::new(steps);
        tracing::debug!(
            steps = timeline.len(),
            total_duration = timeline.total_duration(),
            "timeline assembled"
        );
        Ok(timeline)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/sequencer.rs"]
mod tests;
