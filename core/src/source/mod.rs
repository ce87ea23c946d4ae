//! Lazy record sources.
//!
//! Responsibilities:
//! - Define the `has_next` / `next_record` capability the serializer pulls from
//! - Adapt plain and fallible iterators
//! - Fetch paged collections one page at a time
//!
//! Non-responsibilities:
//! - Encoding
//! - Retry or backoff (a failing source ends the stream)

pub mod types;
pub mod iter;
pub mod paged;

pub use types::RecordSource;
pub use iter::{IterSource, FallibleIterSource};
pub use paged::PagedSource;
