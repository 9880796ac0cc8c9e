//! Audit Logger — durable append-only trail, one JSON line per completed
//! request.
//!
//! Appends are serialized behind a mutex so concurrent requests cannot
//! interleave partial lines. A failed append is surfaced to the operator
//! log but never fails the request that produced it.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::pipeline::OutputSource;

/// One immutable audit entry. Holds the redacted input snapshot, never the
/// raw request and never rejected model output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    /// ISO-8601 UTC timestamp.
    pub timestamp: String,
    pub agent: String,
    pub request_id: Uuid,
    pub prompt_version: String,
    pub redacted_input: Value,
    pub source: OutputSource,
}

impl AuditRecord {
    pub fn new(
        agent: &str,
        request_id: Uuid,
        prompt_version: &str,
        redacted_input: Value,
        source: OutputSource,
    ) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            agent: agent.to_string(),
            request_id,
            prompt_version: prompt_version.to_string(),
            redacted_input,
            source,
        }
    }
}

/// Append-only audit log handle, opened once at startup and shared
/// process-wide.
pub struct AuditLog {
    file: Mutex<File>,
}

impl AuditLog {
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open audit log at {}", path.display()))?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Appends one record as a single JSON line and flushes it.
    pub fn append(&self, record: &AuditRecord) -> Result<()> {
        let line = serde_json::to_string(record).context("failed to serialize audit record")?;
        let mut file = self
            .file
            .lock()
            .map_err(|_| anyhow::anyhow!("audit log lock poisoned"))?;
        writeln!(file, "{line}").context("failed to append audit record")?;
        file.flush().context("failed to flush audit log")?;
        Ok(())
    }
}

/// Best-effort append: a write failure is an operator-channel error, not a
/// caller-facing one. Called exactly once per completed request.
pub fn append_best_effort(log: &AuditLog, record: &AuditRecord) {
    if let Err(e) = log.append(record) {
        tracing::error!(
            agent = %record.agent,
            request_id = %record.request_id,
            "audit write failed: {e:#}"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::redact::{contains_pii, redact};
    use serde_json::json;

    fn record(source: OutputSource) -> AuditRecord {
        AuditRecord::new(
            "talent_scout",
            Uuid::new_v4(),
            "talent-scout-v1.0",
            json!({"resume_text": redact("Python dev, jane@x.com, 5 years")}),
            source,
        )
    }

    #[test]
    fn test_append_writes_one_json_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.log");
        let log = AuditLog::open(&path).unwrap();

        log.append(&record(OutputSource::Model)).unwrap();
        log.append(&record(OutputSource::Fallback)).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: AuditRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.agent, "talent_scout");
        assert!(matches!(first.source, OutputSource::Model));
        let second: AuditRecord = serde_json::from_str(lines[1]).unwrap();
        assert!(matches!(second.source, OutputSource::Fallback));
    }

    #[test]
    fn test_records_carry_iso8601_timestamp_and_version() {
        let r = record(OutputSource::Model);
        assert!(r.timestamp.ends_with('Z'));
        assert!(r.timestamp.contains('T'));
        assert_eq!(r.prompt_version, "talent-scout-v1.0");
    }

    #[test]
    fn test_written_lines_contain_no_unredacted_pii() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.log");
        let log = AuditLog::open(&path).unwrap();

        log.append(&record(OutputSource::Fallback)).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("jane@x.com"));
        assert!(contents.contains("[REDACTED_EMAIL]"));

        let parsed: AuditRecord = serde_json::from_str(contents.lines().next().unwrap()).unwrap();
        let snapshot = parsed.redacted_input["resume_text"].as_str().unwrap();
        assert!(!contains_pii(snapshot));
    }

    #[test]
    fn test_reopening_appends_rather_than_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.log");

        AuditLog::open(&path)
            .unwrap()
            .append(&record(OutputSource::Model))
            .unwrap();
        AuditLog::open(&path)
            .unwrap()
            .append(&record(OutputSource::Model))
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }
}
