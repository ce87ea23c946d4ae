use serde::Serialize;

use crate::encoder::types::RecordEncoder;
use crate::types::EncodeError;

/// Compact JSON encoding for any `Serialize` record.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder {
    pretty: bool,
}

impl JsonEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indented output. Mostly useful for debugging dumps.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl<R: Serialize> RecordEncoder<R> for JsonEncoder {
    fn encode(&mut self, record: &R, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        if self.pretty {
            serde_json::to_writer_pretty(out, record)?;
        } else {
            serde_json::to_writer(out, record)?;
        }
        Ok(())
    }
}
