//! Kernel window resolution with edge-replicate clamping.

pub(crate) mod window;
