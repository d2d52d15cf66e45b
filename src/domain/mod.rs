//! Domain data: the immutable simulation config and the spawn palette.

pub mod config;

pub use config::{Rgb, SimConfig, DEFAULT_PALETTE};
