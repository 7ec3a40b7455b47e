// src/utils/logger.rs

use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::sync::OnceLock;

static LOGGER: OnceLock<ConsoleLogger> = OnceLock::new();

/// Writes log records to stderr so the feature table can go to stdout.
struct ConsoleLogger {
  level: LevelFilter,
}

pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
  let logger = LOGGER.get_or_init(|| ConsoleLogger { level });
  log::set_logger(logger).map(|()| log::set_max_level(level))
}

fn marker(level: Level) -> &'static str {
  match level {
    Level::Error => "🔴",
    Level::Warn => "🟠",
    Level::Info => "🔵",
    Level::Debug => "⚪",
    Level::Trace => "▫️",
  }
}

/// Format: "🔴  mof.cif: Could not read ..."
fn format_record(record: &Record) -> String {
  format!("{}  {}", marker(record.level()), record.args())
}

impl log::Log for ConsoleLogger {
  fn enabled(&self, metadata: &Metadata) -> bool {
    metadata.level() <= self.level
  }

  fn log(&self, record: &Record) {
    if self.enabled(record.metadata()) {
      let stderr = std::io::stderr();
      let mut handle = stderr.lock();
      let _ = writeln!(handle, "{}", format_record(record));
    }
  }

  fn flush(&self) {
    let _ = std::io::stderr().flush();
  }
}
