use crate::{
    foundation::error::{KernelScanError, KernelScanResult},
    timeline::step::Phase,
};

/// Default decay constant for [`speed_factor`].
pub const DEFAULT_DECAY_CONSTANT: f64 = 100.0;

/// Base duration (seconds) of each phase before speed decay.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PhaseDurations {
    /// [`Phase::HighlightWindow`].
    pub highlight_window: f64,
    /// [`Phase::RevealResult`].
    pub reveal_result: f64,
    /// [`Phase::AdvanceWindow`].
    pub advance_window: f64,
    /// [`Phase::Complete`].
    pub complete: f64,
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self {
            highlight_window: 0.1,
            reveal_result: 0.1,
            advance_window: 1.0,
            complete: 0.2,
        }
    }
}

impl PhaseDurations {
    /// Base duration for `phase`.
    pub fn base(&self, phase: Phase) -> f64 {
        match phase {
            Phase::HighlightWindow => self.highlight_window,
            Phase::RevealResult => self.reveal_result,
            Phase::AdvanceWindow => self.advance_window,
            Phase::Complete => self.complete,
        }
    }

    /// Every base duration must be finite and `> 0`.
    pub fn validate(&self) -> KernelScanResult<()> {
        for phase in Phase::ALL {
            let d = self.base(phase);
            if !d.is_finite() || d <= 0.0 {
                return Err(KernelScanError::validation(format!(
                    "base duration for {} must be finite and > 0 (got {d})",
                    phase.as_str()
                )));
            }
        }
        Ok(())
    }
}

/// Pacing multiplier for scan position `position`: `exp(-position / decay_constant)`.
///
/// Non-increasing in `position`, `1.0` at position 0, and floored at `f64::MIN_POSITIVE` so that
/// very long scans never produce zero-length steps. An infinite decay constant disables decay.
pub fn speed_factor(position: usize, decay_constant: f64) -> f64 {
    (-(position as f64) / decay_constant)
        .exp()
        .max(f64::MIN_POSITIVE)
}

/// Derives step durations from scan position and phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pacing {
    decay_constant: f64,
    durations: PhaseDurations,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            decay_constant: DEFAULT_DECAY_CONSTANT,
            durations: PhaseDurations::default(),
        }
    }
}

impl Pacing {
    /// Fails with `Validation` for a decay constant that is `NaN` or `<= 0`, or for invalid
    /// base durations. `+∞` is accepted and disables decay.
    pub fn new(decay_constant: f64, durations: PhaseDurations) -> KernelScanResult<Self> {
        if decay_constant.is_nan() || decay_constant <= 0.0 {
            return Err(KernelScanError::validation(format!(
                "decay constant must be > 0 (got {decay_constant})"
            )));
        }
        durations.validate()?;
        Ok(Self {
            decay_constant,
            durations,
        })
    }

    /// Decay constant passed to [`speed_factor`].
    pub fn decay_constant(&self) -> f64 {
        self.decay_constant
    }

    /// Base durations before decay.
    pub fn durations(&self) -> &PhaseDurations {
        &self.durations
    }

    /// [`speed_factor`] with this pacing's decay constant.
    pub fn speed_factor(&self, position: usize) -> f64 {
        speed_factor(position, self.decay_constant)
    }

    /// Seconds for `phase` at `position`: `base(phase) × speed_factor(position)`.
    ///
    /// Always `> 0`; the product is floored at the smallest positive `f64` because a tiny base
    /// times a tiny factor can still underflow.
    pub fn duration(&self, phase: Phase, position: usize) -> f64 {
        (self.durations.base(phase) * self.speed_factor(position)).max(f64::from_bits(1))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/pacing.rs"]
mod tests;
