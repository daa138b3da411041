//! # kernelscan guide
//!
//! A standalone walkthrough of what a "scan" is and how its pieces fit together.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`Grid`](crate::Grid): immutable `rows × cols` samples, `NaN` for missing data. Construction
//!   computes the global maximum once; it is the normalization divisor for every grid derived
//!   from this one.
//! - [`WindowResolver`](crate::WindowResolver): for an odd kernel size, maps a center cell to the
//!   `kernel_size²` cells of its window, clamping out-of-range offsets to the nearest edge.
//! - [`ReductionOperator`](crate::ReductionOperator): folds one window's values into a single
//!   value. [`ReductionKind`](crate::ReductionKind) covers median, min, max and mean;
//!   [`FnOperator`](crate::FnOperator) wraps any closure.
//! - [`ReductionEngine`](crate::ReductionEngine): applies an operator at every position and
//!   yields a [`DerivedGrid`](crate::DerivedGrid).
//! - [`TimelineSequencer`](crate::TimelineSequencer): turns the normalized result grid into a
//!   [`Timeline`](crate::Timeline) of [`AnimationStep`](crate::AnimationStep)s.
//!
//! ---
//!
//! ## The step sequence
//!
//! Positions are visited in row-major order. Position `p` emits:
//!
//! 1. `HighlightWindow`: the window's cells, whose colors come from the source grid
//! 2. `RevealResult`: the destination cell `p` and its result color
//! 3. `AdvanceWindow` from `p` to `p + 1`, or `Complete` for the last position
//!
//! A single-cell grid therefore produces exactly three steps and never advances.
//!
//! ## Pacing
//!
//! Every step lasts `base(phase) × speed_factor(p)` seconds with
//! `speed_factor(p) = exp(-p / decay_constant)`. Early positions play slowly enough to follow;
//! later ones speed up so large grids stay watchable. See [`Pacing`](crate::Pacing) and
//! [`PhaseDurations`](crate::PhaseDurations).
//!
//! Renderers that sample by wall-clock time can use
//! [`Timeline::locate`](crate::Timeline::locate) to find the active step and its progress.
//!
//! ## Missing samples
//!
//! A window whose center is missing produces a missing result and the operator is not called.
//! Otherwise missing neighbors are dropped before reduction. Missing cells normalize to
//! [`DisplayColor::NoData`](crate::DisplayColor::NoData).
//!
//! ## Determinism and parallelism
//!
//! [`ReduceThreading`](crate::ReduceThreading) enables a dedicated rayon pool for the reduction
//! pass. Results are collected by position and the lowest failing position wins, so enabling it
//! never changes the output or the reported error. The timeline itself is always built in one
//! sequential pass; [`Timeline::fingerprint`](crate::Timeline::fingerprint) gives a cheap way to
//! compare runs.
//!
//! ## Errors
//!
//! All failures are fatal to the request: there is no partial timeline.
//! [`KernelScanError`](crate::KernelScanError) names the offending grid property, kernel size,
//! or window center.
