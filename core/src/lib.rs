//! framed-stream-core
//!
//! Streaming collection serializer: turns a lazy record source into one
//! framed byte stream (`head + r₁ + "," + … + rₙ + tail`) that can be pulled
//! in buffers of any size or pushed into a sink.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;

pub mod encoder;
pub mod source;
pub mod telemetry;

// Stream layers
pub mod stream;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::encoder::{JsonEncoder, RecordEncoder};
    pub use crate::source::{FallibleIterSource, IterSource, PagedSource, RecordSource};
    pub use crate::stream::{
        serialize_collection, CollectionSerializer, EncodeFailurePolicy, Frame, OutputSink,
        SerializerConfig, SerializerOptions,
    };
    pub use crate::telemetry::SerializeReport;
    pub use crate::types::{CollectionError, EncodeError, SerializeError, SourceError};
}
