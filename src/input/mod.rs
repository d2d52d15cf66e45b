//! Input boundary: pose landmarks in, spawn commands and pointer position out.

mod mapper;
mod pose;

pub use mapper::{InputMapper, MapperOutput, SpawnCommand, SpawnKind};
pub use pose::{Joint, Landmark, PoseFrame};
