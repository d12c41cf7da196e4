//! Musical time primitives for the Cadence workspace.
//!
//! [`Beats`] is the exact beat + tick position used by scheduling, snapping
//! and quantization code. All values share the engine-wide [`PPQN`]
//! resolution, so any two of them can be compared or combined directly.

mod beats;
mod ops;
mod round;

pub use beats::{Beats, ParseBeatsError};
pub use round::RoundMode;

/// Ticks per quarter-note beat.
pub const PPQN: i32 = 1920;
