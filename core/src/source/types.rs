use crate::types::SourceError;

/// A lazy, possibly expensive sequence of records.
///
/// `has_next` may be called any number of times between two `next_record`
/// calls and must keep answering the same way. Implementations backed by an
/// external resource (an open cursor, a connection) release it in `close`,
/// which the serializer calls exactly once: on reaching the end of the frame,
/// after a terminal error, or when it is dropped mid-stream.
pub trait RecordSource {
    type Record;

    /// Whether another record is available.
    fn has_next(&mut self) -> Result<bool, SourceError>;

    /// Pull the next record. `Ok(None)` means the source is exhausted.
    fn next_record(&mut self) -> Result<Option<Self::Record>, SourceError>;

    /// Release the underlying resource.
    fn close(&mut self) {}
}

impl<S: RecordSource + ?Sized> RecordSource for Box<S> {
    type Record = S::Record;

    fn has_next(&mut self) -> Result<bool, SourceError> {
        (**self).has_next()
    }

    fn next_record(&mut self) -> Result<Option<Self::Record>, SourceError> {
        (**self).next_record()
    }

    fn close(&mut self) {
        (**self).close()
    }
}
