//! Animation steps, pacing, and timeline assembly.

pub(crate) mod pacing;
pub(crate) mod sequencer;
pub(crate) mod step;
