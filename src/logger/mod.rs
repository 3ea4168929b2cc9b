//! Logger module
//!
//! Logging is an injected collaborator: the server holds an
//! `Arc<dyn Logger>` in its state instead of writing to a global sink,
//! so tests can capture or silence output.
//!
//! - `LogWriter`: console or file output with a minimum level
//! - `CaptureLogger`: keeps records in memory
//! - `NullLogger`: discards everything

mod format;
pub mod writer;

pub use format::{Level, LogRecord, LOGGER_NAME};
pub use writer::LogWriter;

use crate::config::Config;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};

/// Sink for log records
pub trait Logger: Send + Sync {
    fn log(&self, level: Level, message: &str);

    fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }

    fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    fn warn(&self, message: &str) {
        self.log(Level::Warn, message);
    }

    fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }
}

/// Build the logger described by the logging configuration
pub fn from_config(config: &Config) -> Result<Arc<dyn Logger>, Box<dyn std::error::Error>> {
    let level: Level = config.logging.level.parse()?;
    let writer = match config.logging.log_file.as_deref() {
        Some(path) => LogWriter::file(path, level)?,
        None => LogWriter::console(level),
    };
    Ok(Arc::new(writer))
}

/// Logger that drops every record
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _level: Level, _message: &str) {}
}

/// Logger that keeps records in memory
#[derive(Debug, Default)]
pub struct CaptureLogger {
    records: Mutex<Vec<LogRecord>>,
}

impl CaptureLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records logged so far
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// `(level, message)` pairs, convenient for assertions
    pub fn entries(&self) -> Vec<(Level, String)> {
        self.records()
            .into_iter()
            .map(|r| (r.level, r.message))
            .collect()
    }

    /// Whether a record at `level` contains `needle`
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|r| r.level == level && r.message.contains(needle))
    }
}

impl Logger for CaptureLogger {
    fn log(&self, level: Level, message: &str) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(LogRecord::new(level, message));
    }
}

pub fn log_server_start(logger: &dyn Logger, addr: &SocketAddr, config: &Config) {
    logger.info("======================================");
    logger.info("Memory server started successfully");
    logger.info(&format!("Listening on: http://{addr}"));
    logger.info(&format!("Memory directory: {}", config.memory.dir));
    logger.info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        logger.info(&format!("Worker threads: {workers}"));
    }
    if let Some(max) = config.performance.max_connections {
        logger.info(&format!("Max connections: {max}"));
    }
    if let Some(ref path) = config.logging.log_file {
        logger.info(&format!("Log file: {path}"));
    }
    logger.info(&format!("  - GET  http://{addr}/memory/latest"));
    logger.info(&format!("  - GET  http://{addr}/memory/v{{version}}-{{subversion}}"));
    logger.info("======================================");
}

pub fn log_connection_accepted(logger: &dyn Logger, peer_addr: &SocketAddr) {
    logger.debug(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(logger: &dyn Logger, err: &impl std::fmt::Debug) {
    logger.error(&format!("Failed to serve connection: {err:?}"));
}

/// One access line per served request
pub fn log_access(logger: &dyn Logger, method: &str, path: &str, status: u16, body_bytes: usize) {
    logger.info(&format!("{method} {path} - {status} ({body_bytes} bytes)"));
}
