//! One-shot API: drain a serializer into an output sink and report.

use std::sync::PoisonError;

use crate::encoder::RecordEncoder;
use crate::source::RecordSource;
use crate::stream::io::{open_output, OutputSink};
use crate::stream::serializer::CollectionSerializer;
use crate::telemetry::SerializeReport;
use crate::types::CollectionError;

/// Serialize a whole collection into `output`.
///
/// The serializer is consumed; its record source is closed before this
/// returns, whether the drain succeeded or not. For `OutputSink::Memory`
/// the produced bytes are attached to the report.
///
/// On failure the error still carries the report, with the skip count and
/// any memory output produced before the stream stopped.
pub fn serialize_collection<S, E>(
    mut serializer: CollectionSerializer<S, E>,
    output: OutputSink,
) -> Result<SerializeReport, CollectionError>
where
    S: RecordSource,
    E: RecordEncoder<S::Record>,
{
    let (mut writer, maybe_buf) = match open_output(output) {
        Ok(opened) => opened,
        Err(error) => return Err(CollectionError::new(error, serializer.report())),
    };
    let drained = serializer.drain_into(&mut writer);

    let mut report = serializer.report();
    if let Some(buf) = maybe_buf {
        let data = buf.lock().unwrap_or_else(PoisonError::into_inner);
        report.attach_output(data.clone());
    }

    if let Err(error) = drained {
        tracing::warn!(
            error = %error,
            skipped = report.records_skipped,
            bytes = report.bytes_delivered,
            "collection serialization stopped early"
        );
        return Err(CollectionError::new(error, report));
    }

    tracing::debug!(
        records = report.records_encoded,
        skipped = report.records_skipped,
        bytes = report.bytes_delivered,
        "collection serialized"
    );
    Ok(report)
}
