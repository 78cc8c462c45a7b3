//! Shared types for hugopod.

use crate::note::Note;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Reference to the vault that owns a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultRef {
    /// Filesystem path of the vault, as recorded by the workspace.
    pub fs_path: String,

    /// Explicit vault name. Falls back to the last component of `fs_path`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl VaultRef {
    pub fn new(fs_path: impl Into<String>) -> Self {
        Self {
            fs_path: fs_path.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The name used as the top-level output directory for this vault.
    pub fn name(&self) -> &str {
        if let Some(ref name) = self.name {
            return name;
        }
        Path::new(&self.fs_path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.fs_path)
    }
}

/// A note timestamp: epoch milliseconds or a textual date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Millis(i64),
    Text(String),
}

impl Timestamp {
    /// Timestamp for the current instant.
    pub fn now() -> Self {
        Timestamp::Millis(Utc::now().timestamp_millis())
    }

    /// Parse into a UTC date-time.
    ///
    /// Text values may be RFC 3339, a bare integer of milliseconds, or a
    /// `YYYY-MM-DD` date (taken as midnight UTC).
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Timestamp::Millis(ms) => DateTime::from_timestamp_millis(*ms),
            Timestamp::Text(text) => {
                let text = text.trim();
                if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
                    return Some(dt.with_timezone(&Utc));
                }
                if let Ok(ms) = text.parse::<i64>() {
                    return DateTime::from_timestamp_millis(ms);
                }
                NaiveDate::parse_from_str(text, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .map(|naive| naive.and_utc())
            }
        }
    }

    /// ISO-8601 representation with millisecond precision, e.g.
    /// `2021-01-01T00:00:00.000Z`.
    pub fn to_iso(&self) -> Option<String> {
        self.to_datetime()
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Timestamp::Millis(0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Millis(ms) => write!(f, "{}", ms),
            Timestamp::Text(text) => f.write_str(text),
        }
    }
}

/// One export invocation: where to write, and which notes.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    /// Destination root directory.
    pub dest: PathBuf,

    /// Notes to export, in the order outcomes are reported.
    pub notes: Vec<Note>,
}

impl ExportRequest {
    pub fn new(dest: impl Into<PathBuf>, notes: Vec<Note>) -> Self {
        Self {
            dest: dest.into(),
            notes,
        }
    }
}
