//! Audit records for requests.

use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::BTreeMap;

use super::Request;

/// Table that request audit records land in.
pub const REQUESTS_TABLE: &str = "requests";

/// A row destined for the storage helper: table name plus column values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub table: String,
    pub fields: BTreeMap<String, String>,
}

impl LogRecord {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}

impl Request {
    /// Audit record stamped with the current time.
    pub fn log_info(&self) -> LogRecord {
        self.log_info_at(Utc::now())
    }

    /// `time` is when the record was created, not the protocol `timestamp`.
    pub fn log_info_at(&self, created_at: DateTime<Utc>) -> LogRecord {
        LogRecord::new(REQUESTS_TABLE)
            .field("type", self.kind().as_str())
            .field("time", iso8601(created_at))
    }
}

pub(crate) fn iso8601(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}
