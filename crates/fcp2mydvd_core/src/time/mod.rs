//! Exact time values and display timecodes.

mod rational;
mod smpte;

pub use rational::{round_to_scale, RationalTime};
pub use smpte::{frame_rate, to_smpte, SmpteTime};
