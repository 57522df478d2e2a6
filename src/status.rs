//! Purpose: Define a stable, structured schema for operation status reports.
//! Exports: `Severity`, `Status`, `status_json`.
//! Role: Shared contract helper for CLI diagnostics on stderr.
//! Invariants: Status reports never alter stdout payloads.
//! Invariants: JSON schema is stable once published; fields are additive-only.
use serde_json::{json, Map, Value};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub severity: Severity,
    pub time: String,
    pub cmd: String,
    pub message: String,
}

impl Status {
    pub fn now(severity: Severity, cmd: impl Into<String>, message: impl Into<String>) -> Self {
        let time = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default();
        Self {
            severity,
            time,
            cmd: cmd.into(),
            message: message.into(),
        }
    }
}

pub fn status_json(status: &Status) -> Value {
    let mut inner = Map::new();
    inner.insert("severity".to_string(), json!(status.severity.as_str()));
    inner.insert("time".to_string(), json!(status.time));
    inner.insert("cmd".to_string(), json!(status.cmd));
    inner.insert("message".to_string(), json!(status.message));

    let mut outer = Map::new();
    outer.insert("status".to_string(), Value::Object(inner));
    Value::Object(outer)
}
