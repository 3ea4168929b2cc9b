//! Log record format module
//!
//! Renders records as
//! `2024-05-01 12:00:00,123 - memory_server - INFO - message`.

use chrono::Local;
use std::fmt;
use std::str::FromStr;

/// Logger name printed in every line
pub const LOGGER_NAME: &str = "memory_server";

/// Severity of a log record, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" | "trace" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(format!("Unknown log level: '{other}'")),
        }
    }
}

/// A single log entry
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub time: chrono::DateTime<Local>,
    pub level: Level,
    pub message: String,
}

impl LogRecord {
    /// Create a record stamped with the current local time
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            time: Local::now(),
            level,
            message: message.into(),
        }
    }

    /// Render the record as one line (without trailing newline)
    pub fn format(&self) -> String {
        format!(
            "{} - {} - {} - {}",
            self.time.format("%Y-%m-%d %H:%M:%S,%3f"),
            LOGGER_NAME,
            self.level,
            self.message,
        )
    }
}
