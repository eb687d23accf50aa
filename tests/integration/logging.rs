//! Record shape, filtering, formatting and rendering through the public API.

use noodlog::{
    Arg, Args, Color, Configs, CustomColors, Level, Logger, Output, SharedBuffer, TimeFormat, args,
};
use serde::Serialize;
use serde_json::{Value, json};

fn logger() -> (Logger, SharedBuffer) {
    let buffer = SharedBuffer::new();
    let mut logger = Logger::new();
    logger.set_writer(buffer.clone()).set_exit_on_fatal(false);
    (logger, buffer)
}

fn records(buffer: &SharedBuffer) -> Vec<Value> {
    buffer
        .lines()
        .iter()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
fn json_string_message_is_embedded() {
    let (logger, buffer) = logger();
    logger.info(r#"{"name": "John", "surname": "Doe"}"#);
    let rec = &records(&buffer)[0];
    assert_eq!(rec["level"], "info");
    assert_eq!(rec["message"], json!({"name": "John", "surname": "Doe"}));
}

#[test]
fn record_fields_in_wire_order() {
    let (logger, buffer) = logger();
    logger.warn("ordered");
    let line = &buffer.lines()[0];
    let level = line.find("\"level\"").unwrap();
    let message = line.find("\"message\"").unwrap();
    let time = line.find("\"time\"").unwrap();
    assert!(level < message && message < time);
}

#[test]
fn default_time_is_seconds_precision() {
    let (logger, buffer) = logger();
    logger.info("t");
    let rec = &records(&buffer)[0];
    let time = rec["time"].as_str().unwrap();
    // 2026-01-15 10:30:00
    assert_eq!(time.len(), 19);
    assert_eq!(&time[4..5], "-");
    assert_eq!(&time[10..11], " ");
    assert_eq!(&time[13..14], ":");
}

#[test]
fn threshold_filters_lower_levels() {
    let (mut logger, buffer) = logger();
    logger.set_level("error");
    logger.trace("no");
    logger.debug("no");
    logger.info("no");
    logger.warn("no");
    logger.error("yes");
    logger.fatal("yes");
    let levels: Vec<_> = records(&buffer)
        .iter()
        .map(|r| r["level"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(levels, vec!["error", "fatal"]);
}

#[test]
fn invalid_level_name_means_info() {
    let (mut logger, buffer) = logger();
    logger.set_level("chatty");
    logger.debug("no");
    logger.info("yes");
    assert_eq!(records(&buffer).len(), 1);
}

#[test]
fn every_level_enabled_at_trace() {
    let (mut logger, buffer) = logger();
    logger.set_threshold(Level::Trace);
    for level in [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
    ] {
        logger.log(level, level.name());
    }
    let recs = records(&buffer);
    assert_eq!(recs.len(), 6);
    for rec in recs {
        assert_eq!(rec["level"], rec["message"]);
    }
}

#[test]
fn printf_style_message() {
    let (logger, buffer) = logger();
    logger.info(args!["%s has %d items costing %.2f", "cart", 3, 9.5]);
    logger.info(args!["%d", "abc"]);
    logger.info(args!["%s %s", "only one"]);
    let recs = records(&buffer);
    assert_eq!(recs[0]["message"], "cart has 3 items costing 9.50");
    assert_eq!(recs[1]["message"], "%!d(string=abc)");
    assert_eq!(recs[2]["message"], "only one %!s(MISSING)");
}

#[test]
fn arguments_joined_with_spaces() {
    let (logger, buffer) = logger();
    logger.info(args!["user", 42, "logged in", None::<&str>, json!({"ok": true})]);
    assert_eq!(records(&buffer)[0]["message"], r#"user 42 logged in {"ok":true}"#);
}

#[test]
fn no_arguments_give_empty_message() {
    let (logger, buffer) = logger();
    logger.info(());
    logger.info(Args::default());
    let recs = records(&buffer);
    assert_eq!(recs[0]["message"], "");
    assert_eq!(recs[1]["message"], "");
}

#[test]
fn structured_values_embedded() {
    #[derive(Serialize)]
    struct Order {
        id: u32,
        items: Vec<&'static str>,
    }
    let (logger, buffer) = logger();
    logger.info(Arg::json(&Order { id: 7, items: vec!["ramen"] }));
    logger.info(json!([1, 2, 3]));
    logger.info(Arg::from(12.5));
    let recs = records(&buffer);
    assert_eq!(recs[0]["message"], json!({"id": 7, "items": ["ramen"]}));
    assert_eq!(recs[1]["message"], json!([1, 2, 3]));
    assert_eq!(recs[2]["message"], json!(12.5));
}

#[test]
fn error_values_logged_by_display() {
    let (logger, buffer) = logger();
    let err = std::io::Error::other("Nice error!");
    logger.error(Arg::error(&err));
    assert_eq!(records(&buffer)[0]["message"], "Nice error!");
}

#[test]
fn pretty_records_use_three_space_indent() {
    let (mut logger, buffer) = logger();
    logger.set_pretty_print(true);
    logger.info(r#"{"a":1}"#);
    let out = buffer.contents();
    assert!(out.contains("\n   \"message\": {\n      \"a\": 1\n   },\n"));
    let rec: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(rec["message"]["a"], 1);
}

#[test]
fn colored_records_wrapped_in_level_color() {
    let (mut logger, buffer) = logger();
    logger.set_colors(true).set_threshold(Level::Trace);
    logger.debug("d");
    logger.error("e");
    logger.info("i");
    let lines = buffer.lines();
    assert!(lines[0].starts_with("\x1b[32m{") && lines[0].ends_with("}\x1b[0m"));
    assert!(lines[1].starts_with("\x1b[31m{"));
    assert!(lines[2].starts_with("\x1b[0m{"));
}

#[test]
fn custom_colors_from_configs() {
    let (mut logger, buffer) = logger();
    logger
        .set_configs(Configs {
            colors: Some(true),
            custom_colors: Some(CustomColors {
                info: Some(Color::rgb(10, 20, 30).background("white")),
                warn: Some(Color::rgb(300, 0, 0)),
                ..CustomColors::default()
            }),
            ..Configs::default()
        })
        .unwrap();
    logger.info("i");
    logger.warn("w");
    let lines = buffer.lines();
    assert!(lines[0].starts_with("\x1b[38;2;10;20;30m\x1b[47m{"));
    assert!(lines[1].starts_with("\x1b[0m{"));
}

#[test]
fn custom_time_zone_and_format() {
    let (mut logger, buffer) = logger();
    logger.set_time_format(
        TimeFormat::default()
            .with_zone("UTC")
            .with_format("%Y-%m-%dT%H:%M:%S%:z"),
    );
    logger.info("t");
    let rec = &records(&buffer)[0];
    assert!(rec["time"].as_str().unwrap().ends_with("+00:00"));
}

#[test]
fn file_output_appends_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    let mut logger = Logger::new();
    logger.set_output(&Output::File(path.clone())).unwrap();
    logger.info("first");
    logger.warn("second");
    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains(r#""message":"second""#));
}

#[test]
fn fatal_suppressed_exit_writes_record() {
    let (logger, buffer) = logger();
    logger.fatal("Hello, I'm gonna exit!");
    assert_eq!(records(&buffer)[0]["level"], "fatal");
}

#[test]
fn panic_carries_record_and_writes_nothing() {
    let (logger, buffer) = logger();
    let payload = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        logger.panic("Hello, I'm gonna panic!");
    }))
    .unwrap_err();
    let record: Value = serde_json::from_str(payload.downcast_ref::<String>().unwrap()).unwrap();
    assert_eq!(record["level"], "panic");
    assert_eq!(record["message"], "Hello, I'm gonna panic!");
    assert!(buffer.is_empty());
}

#[test]
fn concurrent_logging_keeps_lines_whole() {
    let (logger, buffer) = logger();
    std::thread::scope(|s| {
        for t in 0..4 {
            let logger = &logger;
            s.spawn(move || {
                for i in 0..50 {
                    logger.info(args!["thread %d line %d", t, i]);
                }
            });
        }
    });
    let recs = records(&buffer);
    assert_eq!(recs.len(), 200);
}

#[test]
fn independent_loggers_do_not_interfere() {
    let (mut a, buf_a) = logger();
    let (b, buf_b) = logger();
    a.set_level("error").set_pretty_print(true);
    a.info("filtered");
    b.info("written");
    assert!(buf_a.is_empty());
    assert_eq!(buf_b.lines().len(), 1);
}
