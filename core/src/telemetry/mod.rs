//! telemetry/mod.rs
//! Counters, stage timers and the immutable report produced once a stream ends.
//!
//! The skip count lives here: records dropped by the skip policy never reach
//! the byte stream, so this is the only place they are visible.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;
