//! Windowed reduction operators and the per-position reduction pass.

pub(crate) mod engine;
pub(crate) mod operator;
