use anyhow::Result;
use chrono::{DateTime, Local};
use log::{LevelFilter, Record};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

// Logging goes to a file because stdout is taken over by the terminal UI.

pub struct SimpleLogger {
    log_file: std::fs::File,
    level: LevelFilter,
}

impl SimpleLogger {
    pub fn new(log_file_path: &Path, level: LevelFilter) -> Result<Self> {
        let log_file = OpenOptions::new().create(true).append(true).open(log_file_path)?;
        Ok(SimpleLogger { log_file, level })
    }
}

impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now: DateTime<Local> = Local::now();
            let log_message = format!(
                "[{}] {} [{}:{}] {}\n",
                now.format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            );

            // &File implements Write
            let _ = (&self.log_file).write_all(log_message.as_bytes());
        }
    }

    fn flush(&self) {
        let _ = (&self.log_file).flush();
    }
}

/// Parses a level name such as "debug", falling back to Info.
pub fn parse_level(level: &str) -> LevelFilter {
    LevelFilter::from_str(level.trim()).unwrap_or_else(|_| {
        eprintln!("Unknown log level '{}', using info", level);
        LevelFilter::Info
    })
}

pub fn setup_logging(log_file: &Path, level: LevelFilter) -> Result<()> {
    let logger = SimpleLogger::new(log_file, level)?;
    log::set_boxed_logger(Box::new(logger)).map(|()| log::set_max_level(level))?;

    log::info!("Logging initialized at level: {}", level);
    log::info!("App version: {} ({})", env!("CARGO_PKG_VERSION"), env!("CARGO_PKG_NAME"));

    Ok(())
}
