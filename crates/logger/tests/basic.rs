//! Basic tests for the logger

use zlog_logger::test_support::CaptureLogger;
use zlog_logger::*;

#[test]
fn test_macros_capture_call_site() {
    let logger = CaptureLogger::new(Severity::Debug);

    let id = 10010;
    error!(logger, "error log: id={id}");
    let line = line!() - 1;

    let records = logger.records();
    assert_eq!(records.len(), 1);
    let caller = records[0].caller();
    assert_eq!(caller.function, "test_macros_capture_call_site");
    assert_eq!(caller.file, "basic.rs");
    assert_eq!(caller.line, line);
    assert_eq!(records[0].message(), "error log: id=10010");
}

#[test]
fn test_methods_report_the_caller_line() {
    let logger = CaptureLogger::new(Severity::Debug);

    logger.info("info log...");
    let line = line!() - 1;

    let records = logger.records();
    assert_eq!(records[0].caller().file, "basic.rs");
    assert_eq!(records[0].caller().line, line);
}

#[test]
fn test_only_macros_name_the_function() {
    let logger = CaptureLogger::new(Severity::Debug);

    logger.warn("from method");
    let method_line = line!() - 1;
    warn!(logger, "from macro");
    let macro_line = line!() - 1;

    let lines = logger.lines();
    assert!(lines[0].ends_with(&format!("[WARN] [?:basic.rs:{method_line}] from method")));
    assert!(lines[1].ends_with(&format!(
        "[WARN] [test_only_macros_name_the_function:basic.rs:{macro_line}] from macro"
    )));
}

#[test]
fn test_warn_threshold_passes_two_of_four() {
    let logger = CaptureLogger::new(Severity::Warn);

    logger.debug("debug log...");
    logger.info("info log...");
    logger.warn("warn log...");
    logger.error("error log...");

    let severities: Vec<_> = logger.records().iter().map(LogRecord::severity).collect();
    assert_eq!(severities, vec![Severity::Warn, Severity::Error]);
    // Gated calls never reach the backend
    assert_eq!(logger.log_calls(), 2);
}

#[test]
fn test_both_gates_agree() {
    for min in Severity::ALL {
        for severity in Severity::ALL {
            let logger = CaptureLogger::new(min);

            let outer = logger.is_enabled(severity);
            // Bypass the outer gate so only the backend's own check runs
            logger.log(severity, CallerInfo::here(), format_args!("probe"));
            let inner = !logger.records().is_empty();

            assert_eq!(outer, inner, "gates disagree for {severity} at {min}");
            assert_eq!(outer, is_enabled(severity, min));
        }
    }
}

#[test]
fn test_fatal_is_only_a_label() {
    let logger = CaptureLogger::new(Severity::Fatal);

    logger.fatal("fatal log...");
    fatal!(logger, "still running after {}", "fatal");

    assert_eq!(logger.records().len(), 2);
}

#[test]
fn test_macros_through_arc() {
    let logger = std::sync::Arc::new(CaptureLogger::new(Severity::Info));

    debug!(logger, "dropped");
    info!(logger, "kept {}", 1);
    warn!(logger, "kept {}", 2);

    assert_eq!(logger.lines().len(), 2);
    assert!(logger.contains("kept 2"));
    assert!(!logger.contains("dropped"));
}
