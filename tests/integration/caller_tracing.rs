//! Caller tracing: `file` and `function` point at the application code.

use noodlog::{CallerDepth, Logger, SharedBuffer};
use serde_json::Value;

fn traced(single_point: bool) -> (Logger, SharedBuffer) {
    let buffer = SharedBuffer::new();
    let mut logger = Logger::new();
    logger
        .set_writer(buffer.clone())
        .set_trace_caller(true)
        .set_single_point_tracing(single_point);
    (logger, buffer)
}

fn last_record(buffer: &SharedBuffer) -> Value {
    let lines = buffer.lines();
    serde_json::from_str(lines.last().unwrap()).unwrap()
}

#[inline(never)]
fn handle_request(logger: &Logger) {
    logger.info("handling");
}

#[inline(never)]
fn log_through_wrapper(logger: &Logger, message: &str) {
    logger.info(message);
}

#[inline(never)]
fn checkout(logger: &Logger) {
    log_through_wrapper(logger, "checkout");
}

#[inline(never)]
fn via_macro(logger: &Logger) {
    noodlog::warn!(logger: logger, "macro %s", "call");
}

#[test]
fn direct_call_site_reported() {
    let (logger, buffer) = traced(false);
    handle_request(&logger);
    let rec = last_record(&buffer);
    let function = rec["function"].as_str().unwrap();
    let file = rec["file"].as_str().unwrap();
    assert!(function.ends_with("handle_request"), "{function}");
    assert!(file.contains("caller_tracing.rs:"), "{file}");
    let line: u32 = file.rsplit(':').next().unwrap().parse().unwrap();
    assert!(line > 0);
}

#[test]
fn single_point_tracing_skips_the_wrapper() {
    let (logger, buffer) = traced(true);
    checkout(&logger);
    let function = last_record(&buffer)["function"].as_str().unwrap().to_string();
    assert!(function.ends_with("checkout"), "{function}");

    let (logger, buffer) = traced(false);
    checkout(&logger);
    let function = last_record(&buffer)["function"].as_str().unwrap().to_string();
    assert!(function.ends_with("log_through_wrapper"), "{function}");
}

#[test]
fn macro_calls_report_the_enclosing_function() {
    let (logger, buffer) = traced(false);
    via_macro(&logger);
    let rec = last_record(&buffer);
    assert!(rec["function"].as_str().unwrap().ends_with("via_macro"));
    assert_eq!(rec["message"], "macro call");
}

#[test]
fn depth_beyond_stack_omits_fields() {
    let (mut logger, buffer) = traced(false);
    logger.set_caller_depth(CallerDepth(100_000));
    handle_request(&logger);
    let rec = last_record(&buffer);
    assert!(rec.get("file").is_none());
    assert!(rec.get("function").is_none());
    assert_eq!(rec["message"], "handling");
}

#[test]
fn tracing_disabled_omits_fields() {
    let (mut logger, buffer) = traced(false);
    logger.set_trace_caller(false);
    handle_request(&logger);
    let rec = last_record(&buffer);
    assert!(rec.get("file").is_none());
    assert!(rec.get("function").is_none());
}
