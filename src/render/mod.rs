//! Render boundary: data-only shape snapshots and outline smoothing.

mod snapshot;
mod spline;

pub use snapshot::{RenderShape, Shape, TrailDot, SHAPE_CIRCLE, SHAPE_POLYGON};
pub use spline::catmull_rom_closed;
