//! Frame layout and the state machine that walks it.
//!
//! Responsibilities:
//! - Hold the fixed head/tail of a frame
//! - Stage exactly one span (head, one record, or tail) at a time
//! - Decide separators and apply the encode failure policy
//!
//! Non-responsibilities:
//! - Copying into caller buffers (pull adapter)
//! - Sinks (push adapter)

pub mod types;
pub mod machine;

pub use types::{ChunkKind, Frame, FrameState, StagedChunk};
pub use machine::FrameMachine;
