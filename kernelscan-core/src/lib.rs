//! kernelscan turns a sliding-kernel reduction over a 2-D grid (a median filter, for example)
//! into a deterministic animation timeline that a renderer can play back.
//!
//! # Pipeline overview
//!
//! 1. **Load**: the caller builds a [`Grid`] (row-major `f64`, `NaN` = missing sample)
//! 2. **Reduce**: `Grid + kernel size + operator -> DerivedGrid` via [`ReductionEngine`]
//! 3. **Normalize**: source and result grids map to [`DisplayColor`]s on one shared scale
//! 4. **Sequence**: [`TimelineSequencer`] walks positions in row-major order and emits
//!    [`AnimationStep`]s (highlight, reveal, advance/complete) with decaying durations
//!
//! [`run_scan`] performs all of the above in one call.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same grid and [`ScanConfig`] always produce the same [`Timeline`],
//!   including with parallel reduction enabled.
//! - **No IO in the engine**: grid loading and output writing belong to the caller
//!   (see the `kernelscan` CLI).
//! - **No rendering**: the timeline is plain data.
//!
//! For a walkthrough of the concepts, see [`crate::guide`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod foundation;
mod grid;
mod kernel;
mod pipeline;
mod reduce;
mod timeline;

/// High-level, standalone documentation for kernelscan's concepts.
pub mod guide;

pub use foundation::core::{Coord, DisplayColor, GridDims};
pub use foundation::error::{KernelScanError, KernelScanResult};
pub use grid::model::{DerivedGrid, Grid, NormalizedGrid};
pub use kernel::window::{KernelWindow, WindowResolver, resolve_window, validate_kernel_size};
pub use pipeline::config::ScanConfig;
pub use pipeline::run::{ScanOutput, run_scan, run_scan_with_operator};
pub use reduce::engine::{ReduceThreading, ReductionEngine};
pub use reduce::operator::{FnOperator, ReductionKind, ReductionOperator, median};
pub use timeline::pacing::{DEFAULT_DECAY_CONSTANT, Pacing, PhaseDurations, speed_factor};
pub use timeline::sequencer::TimelineSequencer;
pub use timeline::step::{AnimationStep, Phase, StepCursor, Timeline};
