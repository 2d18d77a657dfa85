//! Audit logging for conversions.
//!
//! Provides [`AuditLogger`] which writes NDJSON events to a log file. Every
//! conversion emits structured events recording which dump was read, what was
//! extracted from it, which output file was written, and when.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Mutex;
use std::time::Instant;

use chrono::Local;
use fs2::FileExt;
use serde::Serialize;

use crate::SqlCsvError;

/// A single audit log event, serialized as tagged NDJSON.
#[derive(Serialize)]
#[serde(tag = "event")]
pub enum AuditEvent {
    /// Emitted once at the start of a CLI invocation.
    #[serde(rename = "session_start")]
    SessionStart {
        timestamp: String,
        args: Vec<String>,
        version: String,
    },

    /// Emitted after a dump has been parsed.
    #[serde(rename = "conversion")]
    Conversion {
        timestamp: String,
        file: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        table: Option<String>,
        columns: usize,
        statements: usize,
        rows: usize,
        skipped: usize,
    },

    /// Emitted when a converted output file is persisted.
    #[serde(rename = "file_write")]
    FileWrite {
        timestamp: String,
        file: String,
        format: String,
        rows: usize,
    },

    /// Emitted once at the end of a CLI invocation.
    #[serde(rename = "session_end")]
    SessionEnd {
        timestamp: String,
        duration_ms: u64,
        conversions: u64,
        files_written: u64,
    },
}

struct AuditLoggerInner {
    file: File,
    conversions: u64,
    files_written: u64,
}

/// Thread-safe audit logger that appends NDJSON events to a file.
///
/// File-level locking (via `fs2`) keeps lines from concurrent `sql2csv`
/// processes sharing one log from interleaving.
pub struct AuditLogger {
    inner: Mutex<AuditLoggerInner>,
    start: Instant,
}

impl AuditLogger {
    /// Open (or create) the audit log file in append mode.
    pub fn open(path: &str) -> Result<Self, SqlCsvError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| SqlCsvError::Io(format!("Cannot open audit log {}: {}", path, e)))?;

        Ok(Self {
            inner: Mutex::new(AuditLoggerInner {
                file,
                conversions: 0,
                files_written: 0,
            }),
            start: Instant::now(),
        })
    }

    /// Emit a single audit event as one NDJSON line.
    pub fn emit(&self, event: &AuditEvent) -> Result<(), SqlCsvError> {
        let line = serde_json::to_string(event)
            .map_err(|e| SqlCsvError::Parse(format!("Audit JSON error: {}", e)))?;

        let mut inner = self
            .inner
            .lock()
            .map_err(|_| SqlCsvError::Io("Audit log mutex poisoned".to_string()))?;
        inner
            .file
            .lock_exclusive()
            .map_err(|e| SqlCsvError::Io(format!("Audit log lock error: {}", e)))?;
        writeln!(inner.file, "{}", line)
            .map_err(|e| SqlCsvError::Io(format!("Audit log write error: {}", e)))?;
        inner
            .file
            .flush()
            .map_err(|e| SqlCsvError::Io(format!("Audit log flush error: {}", e)))?;
        inner
            .file
            .unlock()
            .map_err(|e| SqlCsvError::Io(format!("Audit log unlock error: {}", e)))?;

        Ok(())
    }

    /// Emit a `session_start` event.
    pub fn start_session(&self, args: Vec<String>) -> Result<(), SqlCsvError> {
        self.emit(&AuditEvent::SessionStart {
            timestamp: now(),
            args,
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }

    /// Emit a `session_end` event with accumulated counters.
    pub fn end_session(&self) -> Result<(), SqlCsvError> {
        let (conversions, files_written) = {
            let inner = self
                .inner
                .lock()
                .map_err(|_| SqlCsvError::Io("Audit log mutex poisoned".to_string()))?;
            (inner.conversions, inner.files_written)
        };
        self.emit(&AuditEvent::SessionEnd {
            timestamp: now(),
            duration_ms: self.start.elapsed().as_millis() as u64,
            conversions,
            files_written,
        })
    }

    /// Log the outcome of parsing one dump.
    pub fn log_conversion(
        &self,
        file: &str,
        table: Option<&str>,
        columns: usize,
        statements: usize,
        rows: usize,
        skipped: usize,
    ) -> Result<(), SqlCsvError> {
        self.emit(&AuditEvent::Conversion {
            timestamp: now(),
            file: file.to_string(),
            table: table.map(str::to_string),
            columns,
            statements,
            rows,
            skipped,
        })?;
        self.bump(|inner| inner.conversions += 1)
    }

    /// Log a persisted output file.
    pub fn log_file_write(&self, file: &str, format: &str, rows: usize) -> Result<(), SqlCsvError> {
        self.emit(&AuditEvent::FileWrite {
            timestamp: now(),
            file: file.to_string(),
            format: format.to_string(),
            rows,
        })?;
        self.bump(|inner| inner.files_written += 1)
    }

    fn bump(&self, f: impl FnOnce(&mut AuditLoggerInner)) -> Result<(), SqlCsvError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| SqlCsvError::Io("Audit log mutex poisoned".to_string()))?;
        f(&mut inner);
        Ok(())
    }
}

fn now() -> String {
    Local::now().to_rfc3339()
}
