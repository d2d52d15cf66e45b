//! Audio boundary: per-particle tone voices and the mono mixer the host's
//! audio callback pulls from.

mod mixer;
mod tone;

pub use mixer::AudioMixer;
pub use tone::{snap_to_note, Tone, ToneShape};
