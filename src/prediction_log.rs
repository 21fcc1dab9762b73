//! Prediction log
//!
//! Append-only JSONL sink for request/response/latency records.
//! One line per record, written and flushed under a single lock so
//! concurrent appends never interleave.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::models::LogRecord;

pub struct PredictionLog {
    path: PathBuf,
    writer: Mutex<Option<BufWriter<File>>>,
    records_written: AtomicU64,
    write_failures: AtomicU64,
}

impl PredictionLog {
    /// Open (or create) the log file in append mode
    pub fn open(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        tracing::info!("Opened prediction log: {}", path.display());

        Ok(Self {
            path,
            writer: Mutex::new(Some(BufWriter::new(file))),
            records_written: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
        })
    }

    /// Append a record. Failures are reported and counted, never returned:
    /// a broken log sink must not fail the prediction that produced it.
    pub fn append(&self, record: &LogRecord) {
        let line = record.to_jsonl();
        let mut guard = self.writer.lock();

        let Some(writer) = guard.as_mut() else {
            tracing::warn!("Prediction log closed, record {} dropped", record.request_id);
            self.write_failures.fetch_add(1, Ordering::Relaxed);
            return;
        };

        match write_line(writer, &line) {
            Ok(()) => {
                self.records_written.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                self.write_failures.fetch_add(1, Ordering::Relaxed);
                tracing::error!("Failed to write prediction log record {}: {}", record.request_id, e);
            }
        }
    }

    /// Flush and close the sink. Later appends are dropped.
    pub fn shutdown(&self) {
        if let Some(mut writer) = self.writer.lock().take() {
            if let Err(e) = writer.flush() {
                tracing::error!("Failed to flush prediction log: {}", e);
            }
            tracing::info!(
                "Prediction log closed. Records written: {}",
                self.records_written()
            );
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records_written(&self) -> u64 {
        self.records_written.load(Ordering::Relaxed)
    }

    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }
}

fn write_line(writer: &mut BufWriter<File>, line: &str) -> std::io::Result<()> {
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()
}

/// Read every record of a prediction log file
pub fn read_records(path: &Path) -> std::io::Result<Vec<serde_json::Value>> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str(&line) {
            Ok(record) => records.push(record),
            Err(e) => tracing::warn!("Skipping malformed log line: {}", e),
        }
    }

    Ok(records)
}
