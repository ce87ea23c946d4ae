//! stream: framed, backpressure-friendly serialization of lazy collections.
//!
//! Layering:
//! - `framing`: frame layout and the state machine (the only producer)
//! - `pull`: `fill` / `Read` / `BufRead` over the state machine
//! - `push`: `drain_into`, built purely on `fill`
//! - `io` / `core`: sinks and the one-shot API

pub mod config;
pub mod framing;
pub mod serializer;
pub mod pull;
pub mod push;
pub mod io;
pub mod core;

pub use config::{EncodeFailurePolicy, SerializerBuilder, SerializerConfig, SerializerOptions};
pub use framing::{ChunkKind, Frame, FrameState, StagedChunk};
pub use io::{OutputSink, SharedBuffer};
pub use serializer::CollectionSerializer;
pub use self::core::serialize_collection;
