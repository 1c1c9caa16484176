//! Broken-pipe handling tests.

use std::io::ErrorKind;

use crate::error::Stage;
use crate::sink::{SinkHandle, SinkState, WriteStatus};
use crate::tests::support::{Event, EventLog, ScriptedTarget, ScriptedWriter};

#[test]
fn broken_pipe_moves_sink_to_finishing_and_skips_later_writes() {
    let log = EventLog::default();
    let mut writer = ScriptedWriter::new(&log).failing_write_at(1, ErrorKind::BrokenPipe);
    {
        let mut sink = SinkHandle::borrowed("\n", &mut writer);
        assert_eq!(sink.write("one").unwrap(), WriteStatus::Written);
        assert_eq!(sink.write("two").unwrap(), WriteStatus::ReaderClosed);
        assert_eq!(sink.state(), SinkState::Finishing);
        assert_eq!(sink.write("three").unwrap(), WriteStatus::ReaderClosed);
        sink.finish().unwrap();
        assert_eq!(sink.state(), SinkState::Done);
    }

    // Only the first record made it; the flush still ran.
    assert_eq!(log.events(), vec![Event::Write(b"one\n".to_vec()), Event::Flush]);
}

#[test]
fn broken_pipe_on_owned_stream_still_closes_it() {
    let mut target = ScriptedTarget::new();
    target.fail_write_at = Some((0, ErrorKind::BrokenPipe));

    let mut sink = SinkHandle::with_target("\n", &target).unwrap();
    assert_eq!(sink.write("lost").unwrap(), WriteStatus::ReaderClosed);
    sink.finish().unwrap();

    assert_eq!(target.log.events(), vec![Event::Flush, Event::Close]);
}

#[test]
fn broken_pipe_while_flushing_is_absorbed() {
    let log = EventLog::default();
    let mut writer = ScriptedWriter::new(&log).failing_flush(ErrorKind::BrokenPipe);
    let mut sink = SinkHandle::borrowed("\n", &mut writer);
    sink.write("ok").unwrap();
    assert!(sink.finish().is_ok());
}

#[test]
fn other_write_errors_propagate() {
    let log = EventLog::default();
    let mut writer = ScriptedWriter::new(&log).failing_write_at(0, ErrorKind::PermissionDenied);
    let mut sink = SinkHandle::borrowed("\n", &mut writer);

    let err = sink.write("denied").unwrap_err();
    assert_eq!(err.stage, Stage::Write);
    assert_eq!(err.source.kind(), ErrorKind::PermissionDenied);
    assert_eq!(sink.state(), SinkState::Finishing);
    sink.finish().unwrap();
}

#[test]
fn writes_after_a_failed_write_are_errors_not_a_closed_reader() {
    let log = EventLog::default();
    let mut writer = ScriptedWriter::new(&log).failing_write_at(1, ErrorKind::StorageFull);
    let mut sink = SinkHandle::borrowed("\n", &mut writer);

    assert_eq!(sink.write("kept").unwrap(), WriteStatus::Written);
    assert!(sink.write("lost").is_err());

    let err = sink.write("later").unwrap_err();
    assert_eq!(err.stage, Stage::Write);
    assert!(err.to_string().contains("earlier write error"), "{err}");
    assert_eq!(sink.state(), SinkState::Finishing);

    sink.finish().unwrap();
    assert_eq!(log.written_string(), "kept\n");
}

#[test]
fn flush_failure_is_reported_and_owned_stream_still_closed() {
    let mut target = ScriptedTarget::new();
    target.fail_flush = Some(ErrorKind::Other);

    let mut sink = SinkHandle::with_target("\n", &target).unwrap();
    sink.write("r").unwrap();
    let err = sink.finish().unwrap_err();
    assert_eq!(err.stage, Stage::Flush);
    assert_eq!(err.target, "scripted");

    assert_eq!(
        target.log.events(),
        vec![Event::Write(b"r\n".to_vec()), Event::Flush, Event::Close]
    );
}

#[test]
fn close_failure_on_owned_stream_is_reported() {
    let mut target = ScriptedTarget::new();
    target.fail_close = Some(ErrorKind::Other);

    let mut sink = SinkHandle::with_target("\n", &target).unwrap();
    sink.write("r").unwrap();
    let err = sink.finish().unwrap_err();
    assert_eq!(err.stage, Stage::Close);
    assert_eq!(err.target, "scripted");
    assert_eq!(sink.state(), SinkState::Done);
    assert_eq!(target.log.count(&Event::Close), 1);
}

#[test]
fn flush_failure_is_reported_ahead_of_close_failure() {
    let mut target = ScriptedTarget::new();
    target.fail_flush = Some(ErrorKind::Other);
    target.fail_close = Some(ErrorKind::Other);

    let mut sink = SinkHandle::with_target("\n", &target).unwrap();
    let err = sink.finish().unwrap_err();
    assert_eq!(err.stage, Stage::Flush);
    assert_eq!(target.log.count(&Event::Close), 1);
}
