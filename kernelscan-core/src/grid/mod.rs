//! Source, derived, and normalized grids.

pub(crate) mod model;
