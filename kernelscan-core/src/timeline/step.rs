use crate::foundation::{
    core::{Coord, DisplayColor},
    math::Fnv1a64,
};

/// What a step asks the renderer to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Fade in the source colors of the kernel window.
    HighlightWindow,
    /// Place the reduced value into the result grid.
    RevealResult,
    /// Move the kernel highlight to the next scan position.
    AdvanceWindow,
    /// Terminal fade-out of the kernel highlight.
    Complete,
}

impl Phase {
    /// Every phase, in emission order.
    pub const ALL: [Phase; 4] = [
        Phase::HighlightWindow,
        Phase::RevealResult,
        Phase::AdvanceWindow,
        Phase::Complete,
    ];

    /// Serialized identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HighlightWindow => "highlight_window",
            Self::RevealResult => "reveal_result",
            Self::AdvanceWindow => "advance_window",
            Self::Complete => "complete",
        }
    }

    fn tag(self) -> u8 {
        match self {
            Self::HighlightWindow => 0,
            Self::RevealResult => 1,
            Self::AdvanceWindow => 2,
            Self::Complete => 3,
        }
    }
}

/// One discrete visual state of the scan.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationStep {
    /// Scan index this step belongs to.
    pub position: usize,
    /// What the renderer should do.
    pub phase: Phase,
    /// Cells the step applies to, in a phase-specific order:
    /// window neighbors (highlight), the destination cell (reveal),
    /// `[from, to]` (advance), the last center (complete).
    pub subjects: Vec<Coord>,
    /// Result color, present on [`Phase::RevealResult`] only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<DisplayColor>,
    /// Seconds, always `> 0`.
    pub duration: f64,
    /// Multiplier in `(0, 1]` applied to the phase's base duration.
    pub speed_factor: f64,
}

/// Playback position inside a [`Timeline`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepCursor {
    /// Index of the active step.
    pub index: usize,
    /// Fraction of the step elapsed, in `[0, 1]`.
    pub progress: f64,
}

/// Ordered, finite sequence of animation steps.
///
/// A timeline is a plain value: iterating it again replays the same steps.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Timeline {
    steps: Vec<AnimationStep>,
    #[serde(skip)]
    starts: Vec<f64>,
    total_duration: f64,
}

impl Timeline {
    pub(crate) fn new(steps: Vec<AnimationStep>) -> Self {
        let mut starts = Vec::with_capacity(steps.len());
        let mut t = 0.0;
        for step in &steps {
            starts.push(t);
            t += step.duration;
        }
        Self {
            steps,
            starts,
            total_duration: t,
        }
    }

    /// All steps, in playback order.
    pub fn steps(&self) -> &[AnimationStep] {
        &self.steps
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// `true` when there are no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step at `index`.
    pub fn get(&self, index: usize) -> Option<&AnimationStep> {
        self.steps.get(index)
    }

    /// Iterate steps in order. May be called any number of times.
    pub fn iter(&self) -> std::slice::Iter<'_, AnimationStep> {
        self.steps.iter()
    }

    /// Sum of all step durations, in seconds.
    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    /// Playback time at which step `index` begins.
    pub fn start_time(&self, index: usize) -> Option<f64> {
        self.starts.get(index).copied()
    }

    /// Steps emitted for scan position `position`.
    pub fn steps_for_position(&self, position: usize) -> &[AnimationStep] {
        let lo = self.steps.partition_point(|s| s.position < position);
        let hi = self.steps.partition_point(|s| s.position <= position);
        &self.steps[lo..hi]
    }

    /// Find the step active at playback time `t` (seconds).
    ///
    /// Returns `None` before the start, at or after the end, and for non-finite `t`.
    pub fn locate(&self, t: f64) -> Option<StepCursor> {
        if !t.is_finite() || t < 0.0 || t >= self.total_duration {
            return None;
        }
        let index = self.starts.partition_point(|&s| s <= t).checked_sub(1)?;
        let step = &self.steps[index];
        let progress = ((t - self.starts[index]) / step.duration).clamp(0.0, 1.0);
        Some(StepCursor { index, progress })
    }

    /// Stable 64-bit hash of every step field, for cheap equality checks across runs.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_u64(self.steps.len() as u64);
        for step in &self.steps {
            h.write_u64(step.position as u64);
            h.write_u8(step.phase.tag());
            h.write_u64(step.subjects.len() as u64);
            for c in &step.subjects {
                h.write_u64(c.row as u64);
                h.write_u64(c.col as u64);
            }
            match step.color {
                None => h.write_u8(0),
                Some(DisplayColor::NoData) => h.write_u8(1),
                Some(DisplayColor::Gray(v)) => {
                    h.write_u8(2);
                    h.write_u8(v);
                }
            }
            h.write_f64(step.duration);
            h.write_f64(step.speed_factor);
        }
        h.finish()
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a AnimationStep;
    type IntoIter = std::slice::Iter<'a, AnimationStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/step.rs"]
mod tests;
