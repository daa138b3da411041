use std::str::FromStr;

use crate::foundation::error::KernelScanError;

/// Maps the values of one kernel window to a single output value.
///
/// Implementations must be pure: the same slice always yields the same result. Values arrive in
/// row-major window order with missing samples already removed, so the slice is never empty.
pub trait ReductionOperator: Sync {
    /// Stable identifier used in logs and errors.
    fn name(&self) -> &str;

    /// Reduce one window. Errors and non-finite outputs fail the whole request.
    fn reduce(&self, values: &[f64]) -> anyhow::Result<f64>;
}

/// Built-in operators, selectable by identifier in configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReductionKind {
    /// Middle value; even counts average the two middle values.
    #[default]
    Median,
    /// Smallest value.
    Min,
    /// Largest value.
    Max,
    /// Arithmetic mean.
    Mean,
}

impl ReductionKind {
    /// Identifier used in JSON and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Median => "median",
            Self::Min => "min",
            Self::Max => "max",
            Self::Mean => "mean",
        }
    }
}

impl FromStr for ReductionKind {
    type Err = KernelScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "median" => Ok(Self::Median),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            "mean" => Ok(Self::Mean),
            other => Err(KernelScanError::validation(format!(
                "unknown reduction operator '{other}' (expected median, min, max, or mean)"
            ))),
        }
    }
}

impl ReductionOperator for ReductionKind {
    fn name(&self) -> &str {
        self.as_str()
    }

    fn reduce(&self, values: &[f64]) -> anyhow::Result<f64> {
        if values.is_empty() {
            anyhow::bail!("cannot reduce an empty window");
        }
        Ok(match self {
            Self::Median => median(values),
            Self::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            Self::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Self::Mean => values.iter().sum::<f64>() / values.len() as f64,
        })
    }
}

/// Median of a non-empty slice; even counts average the two middle values.
pub fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

/// Adapts a closure into a named [`ReductionOperator`].
pub struct FnOperator<F> {
    name: String,
    f: F,
}

impl<F> FnOperator<F>
where
    F: Fn(&[f64]) -> anyhow::Result<f64> + Sync,
{
    /// Wrap `f` under the identifier `name`.
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> ReductionOperator for FnOperator<F>
where
    F: Fn(&[f64]) -> anyhow::Result<f64> + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn reduce(&self, values: &[f64]) -> anyhow::Result<f64> {
        (self.f)(values)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reduce/operator.rs"]
mod tests;
