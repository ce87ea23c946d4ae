//! Per-record encoders.
//!
//! The encoder owns wire-level syntax for one record; framing (head, tail,
//! separators) stays in the stream layer.

pub mod types;
pub mod json;

pub use types::RecordEncoder;
pub use json::JsonEncoder;
