use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::error::{KernelScanError, KernelScanResult},
    reduce::{engine::ReduceThreading, operator::ReductionKind},
    timeline::pacing::{DEFAULT_DECAY_CONSTANT, Pacing, PhaseDurations},
};

/// Every tunable of a scan. Missing JSON fields take their defaults.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Window width/height; odd and no larger than either grid dimension.
    pub kernel_size: usize,
    /// Controls per-step speed decay; see [`crate::speed_factor`].
    pub decay_constant: f64,
    /// Built-in operator applied to every window.
    pub operator: ReductionKind,
    /// Per-phase base durations, in seconds.
    pub durations: PhaseDurations,
    /// Reduction pass workers.
    pub threading: ReduceThreading,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            kernel_size: 3,
            decay_constant: DEFAULT_DECAY_CONSTANT,
            operator: ReductionKind::Median,
            durations: PhaseDurations::default(),
            threading: ReduceThreading::default(),
        }
    }
}

impl ScanConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(s: &str) -> KernelScanResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| KernelScanError::serde(format!("scan config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> KernelScanResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read scan config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Checks everything that does not depend on the grid shape.
    pub fn validate(&self) -> KernelScanResult<()> {
        self.checked_pacing().map(|_| ())
    }

    /// Runs every check of [`ScanConfig::validate`] and returns the resulting pacing.
    pub(crate) fn checked_pacing(&self) -> KernelScanResult<Pacing> {
        if self.kernel_size == 0 || self.kernel_size % 2 == 0 {
            return Err(KernelScanError::validation(format!(
                "kernel_size must be odd and positive (got {})",
                self.kernel_size
            )));
        }
        self.threading.validate()?;
        self.pacing()
    }

    /// Pacing built from `decay_constant` and `durations`.
    pub fn pacing(&self) -> KernelScanResult<Pacing> {
        Pacing::new(self.decay_constant, self.durations)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/config.rs"]
mod tests;
