//! Engine-free tail sweep logic shared by the authoritative and observer sides.

pub mod combat;
pub mod direction;
pub mod sweep;

pub use direction::Direction;
pub use sweep::{SweepSession, SweepStep};
