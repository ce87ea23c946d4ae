// Encode failures under skip/abort, and source failures.

mod common;

#[cfg(test)]
mod tests {
    use std::io::Read;

    use framed_stream::source::FallibleIterSource;
    use framed_stream::stream::{CollectionSerializer, EncodeFailurePolicy, FrameState};
    use framed_stream::types::SerializeError;

    use super::common::{pull_all, raw_encoder, CountingSource, RawEncoder};

    fn serializer(
        source: CountingSource,
        policy: EncodeFailurePolicy,
    ) -> CollectionSerializer<CountingSource, RawEncoder> {
        CollectionSerializer::builder(source, raw_encoder as RawEncoder)
            .head("[")
            .tail("]")
            .on_encode_error(policy)
            .build()
            .unwrap()
    }

    // --- Skip ---

    #[test]
    fn skip_drops_failed_record_and_reports_it() {
        let (source, _) = CountingSource::new(&["r1", "bad", "r2"]);
        let mut ser = serializer(source, EncodeFailurePolicy::Skip);

        assert_eq!(pull_all(&mut ser, 3), b"[r1,r2]");
        assert_eq!(ser.skipped(), 1);

        let report = ser.report();
        assert_eq!(report.records_pulled, 3);
        assert_eq!(report.records_encoded, 2);
        assert_eq!(report.records_skipped, 1);
        assert!(report.accounts_for_all_records());
        assert!(report.completed);
    }

    #[test]
    fn skip_is_the_default_policy() {
        let (source, _) = CountingSource::new(&["bad", "r1"]);
        let mut ser = CollectionSerializer::builder(source, raw_encoder as RawEncoder)
            .build()
            .unwrap();
        assert_eq!(ser.options().on_encode_error, EncodeFailurePolicy::Skip);
        assert_eq!(pull_all(&mut ser, 64), b"[r1]");
    }

    #[test]
    fn skip_of_consecutive_failures() {
        let (source, _) = CountingSource::new(&["r1", "bad1", "bad2", "r2", "bad3", "r3"]);
        let mut ser = serializer(source, EncodeFailurePolicy::Skip);
        assert_eq!(pull_all(&mut ser, 1), b"[r1,r2,r3]");
        assert_eq!(ser.skipped(), 3);
    }

    #[test]
    fn skip_of_every_record_leaves_empty_frame() {
        let (source, _) = CountingSource::new(&["bad1", "bad2"]);
        let mut ser = serializer(source, EncodeFailurePolicy::Skip);
        assert_eq!(pull_all(&mut ser, 64), b"[]");
        assert_eq!(ser.skipped(), 2);
    }

    #[test]
    fn skip_of_trailing_record_keeps_already_decided_separator() {
        // The separator after r1 was decided (and delivered) before the last
        // record was pulled; it is not taken back.
        let (source, _) = CountingSource::new(&["r1", "bad"]);
        let mut ser = serializer(source, EncodeFailurePolicy::Skip);
        assert_eq!(pull_all(&mut ser, 64), b"[r1,]");

        let report = ser.report();
        assert_eq!(report.records_skipped, 1);
        assert_eq!(report.separators, 1);
        assert!(report.sanity_check());
    }

    // --- Abort ---

    #[test]
    fn abort_returns_partial_bytes_then_the_error() {
        let (source, stats) = CountingSource::new(&["r1", "bad", "r2"]);
        let mut ser = serializer(source, EncodeFailurePolicy::Abort);

        let mut buf = [0u8; 64];
        let n = ser.fill(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"[r1,");

        match ser.fill(&mut buf) {
            Err(SerializeError::Encode { index, source }) => {
                assert_eq!(index, 1);
                assert!(source.message().contains("bad"));
            }
            other => panic!("unexpected result: {:?}", other),
        }

        assert_eq!(ser.state(), FrameState::Done);
        assert_eq!(stats.closed.get(), 1);

        let touches = stats.touches();
        assert_eq!(ser.fill(&mut buf).unwrap(), 0);
        assert_eq!(stats.touches(), touches);
        assert!(!ser.report().completed);
    }

    #[test]
    fn abort_on_first_record_still_delivers_head_first() {
        let (source, _) = CountingSource::new(&["bad"]);
        let mut ser = serializer(source, EncodeFailurePolicy::Abort);

        // "[" is delivered by the same call, so the error is deferred once.
        let mut buf = [0u8; 64];
        assert_eq!(ser.fill(&mut buf).unwrap(), 1);
        assert!(matches!(ser.fill(&mut buf), Err(SerializeError::Encode { index: 0, .. })));
    }

    #[test]
    fn abort_surfaces_immediately_when_nothing_was_copied() {
        let (source, _) = CountingSource::new(&["r1", "bad"]);
        let mut ser = serializer(source, EncodeFailurePolicy::Abort);

        // Buffer ends exactly after "[r1,", so the next call starts on the bad record.
        let mut buf = [0u8; 4];
        assert_eq!(ser.fill(&mut buf).unwrap(), 4);
        assert!(matches!(ser.fill(&mut buf), Err(SerializeError::Encode { index: 1, .. })));
    }

    #[test]
    fn abort_through_read_becomes_io_error() {
        let (source, _) = CountingSource::new(&["r1", "bad"]);
        let mut ser = serializer(source, EncodeFailurePolicy::Abort);
        let mut out = Vec::new();
        let err = ser.read_to_end(&mut out).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::Other);
        assert_eq!(out, b"[r1,");
    }

    #[test]
    fn abort_through_drain_keeps_partial_output() {
        let (source, _) = CountingSource::new(&["r1", "r2", "bad", "r3"]);
        let mut ser = serializer(source, EncodeFailurePolicy::Abort);
        let mut sink = Vec::new();
        assert!(matches!(ser.drain_into(&mut sink), Err(SerializeError::Encode { index: 2, .. })));
        assert_eq!(sink, b"[r1,r2,");
    }

    // --- Source failures ---

    #[test]
    fn source_failure_terminates_stream_with_error() {
        let (source, stats) = CountingSource::failing_at(&["r1", "r2", "r3"], 1);
        let mut ser = serializer(source, EncodeFailurePolicy::Skip);

        let mut buf = [0u8; 64];
        let n = ser.fill(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"[r1,");

        match ser.fill(&mut buf) {
            Err(SerializeError::Source(e)) => assert_eq!(e.message(), "cursor lost"),
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(stats.closed.get(), 1);
        assert_eq!(ser.fill(&mut buf).unwrap(), 0);
    }

    #[test]
    fn fallible_iterator_error_is_not_end_of_input() {
        let items: Vec<Result<String, String>> = vec![
            Ok("r1".into()),
            Err("page 2 unavailable".into()),
            Ok("r2".into()),
        ];
        let mut ser = CollectionSerializer::builder(FallibleIterSource::new(items), raw_encoder as RawEncoder)
            .build()
            .unwrap();

        let mut sink = Vec::new();
        match ser.drain_into(&mut sink) {
            Err(SerializeError::Source(e)) => assert!(e.message().contains("page 2")),
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(sink, b"[r1,");
    }
}
