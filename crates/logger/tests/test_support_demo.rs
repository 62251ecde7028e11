//! Demonstrates the test support functionality

use zlog_logger::test_support::{CaptureDiagnostics, CaptureLogger};
use zlog_logger::{CallerInfo, DiagnosticSink, LogRecord, LoggerExt, Severity};

#[test]
fn test_capture_logger() {
    let capture = CaptureLogger::new(Severity::Trace);

    capture.info("This is captured");
    capture.error("This is also captured");

    assert!(capture.contains("This is captured"));
    let lines = capture.lines();
    assert!(lines[1].contains("[ERROR]"));

    capture.clear();
    assert!(capture.records().is_empty());
    assert_eq!(capture.log_calls(), 0);
}

#[test]
fn test_capture_diagnostics() {
    let sink = CaptureDiagnostics::shared();
    let record = LogRecord::new(Severity::Warn, CallerInfo::here(), "overflow");

    sink.echo("overflow");
    sink.message_lost(&record);
    sink.writer_fault(&std::io::Error::other("disk gone"));

    assert_eq!(sink.echoes(), vec!["overflow".to_string()]);
    assert_eq!(sink.lost(), vec![record]);
    assert_eq!(sink.faults(), vec!["disk gone".to_string()]);
}
