use crate::types::EncodeError;

/// Serializes one record by appending its bytes to `out`.
///
/// `out` is empty on entry. Whatever was appended before an `Err` is
/// discarded by the caller, so implementations need not roll back.
pub trait RecordEncoder<R> {
    fn encode(&mut self, record: &R, out: &mut Vec<u8>) -> Result<(), EncodeError>;
}

impl<R, F> RecordEncoder<R> for F
where
    F: FnMut(&R, &mut Vec<u8>) -> Result<(), EncodeError>,
{
    fn encode(&mut self, record: &R, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        self(record, out)
    }
}
