//! Configuration and the one-shot scan entry point.

pub(crate) mod config;
pub(crate) mod run;
