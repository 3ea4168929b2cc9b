//! Log writer module
//!
//! Writes formatted records to stdout/stderr or to a single log file.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use super::format::{Level, LogRecord};
use super::Logger;

/// Log output target
enum LogTarget {
    /// Info and warnings to stdout, errors to stderr
    Console,
    /// Everything to one file
    File(Mutex<File>),
}

/// Thread-safe log writer with a minimum level filter
pub struct LogWriter {
    target: LogTarget,
    min_level: Level,
}

impl LogWriter {
    /// Console writer
    pub const fn console(min_level: Level) -> Self {
        Self {
            target: LogTarget::Console,
            min_level,
        }
    }

    /// Writer appending to `path`, creating parent directories as needed
    pub fn file(path: &str, min_level: Level) -> io::Result<Self> {
        let file = open_log_file(path)?;
        Ok(Self {
            target: LogTarget::File(Mutex::new(file)),
            min_level,
        })
    }
}

impl Logger for LogWriter {
    fn log(&self, level: Level, message: &str) {
        if level < self.min_level {
            return;
        }
        let line = LogRecord::new(level, message).format();
        match &self.target {
            LogTarget::Console => {
                if level >= Level::Error {
                    eprintln!("{line}");
                } else {
                    println!("{line}");
                }
            }
            LogTarget::File(file) => {
                if let Ok(mut f) = file.lock() {
                    let _ = writeln!(f, "{line}");
                }
            }
        }
    }
}

/// Open or create a log file for appending
fn open_log_file(path: &str) -> io::Result<File> {
    // Create parent directories if they don't exist
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}
