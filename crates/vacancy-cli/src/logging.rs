use anyhow::{Context, Result};
use chrono::{Local, Utc};
use std::fmt;
use std::path::Path;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::{ChronoLocal, ChronoUtc};
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

/// Timestamp in the log file: 2024-12-01 09:15:42,108
const FILE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Timestamp on the console: 2026-02-14 19:44:09.123 -08:00
const CONSOLE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f %:z";

/// One line per event: `<timestamp> - <LEVEL> - <message>`.
///
/// Only the `message` field is written; structured fields stay on the console.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFormat {
    utc: bool,
}

impl LineFormat {
    pub fn new(utc: bool) -> Self {
        Self { utc }
    }

    fn timestamp(&self) -> String {
        if self.utc {
            Utc::now().format(FILE_TIME_FORMAT).to_string()
        } else {
            Local::now().format(FILE_TIME_FORMAT).to_string()
        }
    }
}

fn level_name(level: &Level) -> &'static str {
    if *level == Level::ERROR {
        "ERROR"
    } else if *level == Level::WARN {
        "WARNING"
    } else if *level == Level::INFO {
        "INFO"
    } else if *level == Level::DEBUG {
        "DEBUG"
    } else {
        "TRACE"
    }
}

/// Picks the `message` field out of an event.
#[derive(Default)]
struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.0.push_str(value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut message = MessageVisitor::default();
        event.record(&mut message);
        writeln!(
            writer,
            "{} - {} - {}",
            self.timestamp(),
            level_name(event.metadata().level()),
            message.0
        )
    }
}

/// Install the global subscriber: an append-only log file plus a stderr mirror.
///
/// `RUST_LOG` takes precedence over `filter`.
pub fn init(filter: &str, log_file: &Path, utc: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    let dir = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = log_file
        .file_name()
        .with_context(|| format!("Log file path has no file name: {}", log_file.display()))?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(dir)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(LineFormat::new(utc))
        .with_ansi(false)
        .with_writer(appender);

    let utc_console = utc.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_timer(ChronoUtc::new(CONSOLE_TIME_FORMAT.to_string()))
    });
    let local_console = (!utc).then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_timer(ChronoLocal::new(CONSOLE_TIME_FORMAT.to_string()))
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(utc_console)
        .with(local_console)
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(())
}
