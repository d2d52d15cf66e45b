//! Spatial partitioning - per-frame uniform hash grid for neighbour queries.

pub mod hash_grid;

pub use hash_grid::{CellKey, SpatialHash};
