//! `log` backend that appends to a debug file in the temp dir.
//!
//! Only debug builds write anything; release builds install a logger that
//! drops every record.

use std::path::PathBuf;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

pub const LOG_FILE_NAME: &str = "weekview-debug.log";

pub fn log_path() -> PathBuf {
    std::env::temp_dir().join(LOG_FILE_NAME)
}

pub struct DebugFileLogger {
    path: PathBuf,
    level: LevelFilter,
}

impl DebugFileLogger {
    pub fn new(path: PathBuf, level: LevelFilter) -> Self {
        Self { path, level }
    }

    fn format(record: &Record) -> String {
        format!(
            "{} [{}] {}: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    }

    #[cfg(debug_assertions)]
    fn append(&self, line: &str) {
        use std::io::Write;
        if let Ok(mut f) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
        {
            let _ = writeln!(f, "{}", line);
        }
    }

    #[cfg(not(debug_assertions))]
    fn append(&self, _line: &str) {}
}

impl Log for DebugFileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.append(&Self::format(record));
        }
    }

    fn flush(&self) {}
}

/// Install the file logger as the global `log` backend
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(DebugFileLogger::new(log_path(), level)))?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn level_filter_applies() {
        let logger = DebugFileLogger::new(log_path(), LevelFilter::Warn);
        assert!(logger.enabled(&Metadata::builder().level(Level::Error).build()));
        assert!(logger.enabled(&Metadata::builder().level(Level::Warn).build()));
        assert!(!logger.enabled(&Metadata::builder().level(Level::Debug).build()));
    }

    #[test]
    fn init_installs_global_logger() {
        init(LevelFilter::Info).expect("no other logger installed in unit tests");
        assert_eq!(log::max_level(), LevelFilter::Info);
        assert!(init(LevelFilter::Debug).is_err());
    }

    #[test]
    fn writes_lines_in_debug_builds() {
        let path = std::env::temp_dir().join(format!("weekview_log_{}.log", std::process::id()));
        let logger = DebugFileLogger::new(path.clone(), LevelFilter::Debug);
        logger.log(
            &Record::builder()
                .level(Level::Debug)
                .target("weekview::layout")
                .args(format_args!("laid out {} items", 3))
                .build(),
        );
        let contents = std::fs::read_to_string(&path).unwrap_or_default();
        if cfg!(debug_assertions) {
            assert!(contents.contains("[DEBUG] weekview::layout: laid out 3 items"));
        } else {
            assert!(contents.is_empty());
        }
        let _ = std::fs::remove_file(path);
    }
}
