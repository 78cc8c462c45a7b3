//! Per-note export outcomes.

use crate::error::{ExportError, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// What happened to one note of a batch.
#[derive(Debug)]
pub struct NoteOutcome {
    pub fname: String,
    pub id: String,
    /// Output path, when it could be computed.
    pub path: Option<PathBuf>,
    /// Content length in bytes on success.
    pub result: std::result::Result<usize, ExportError>,
}

impl NoteOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error(&self) -> Option<&ExportError> {
        self.result.as_ref().err()
    }

    fn summary(&self, dry_run: bool) -> OutcomeSummary {
        let (status, bytes, stage, error) = match &self.result {
            Ok(bytes) if dry_run => (OutcomeStatus::Planned, Some(*bytes), None, None),
            Ok(bytes) => (OutcomeStatus::Written, Some(*bytes), None, None),
            Err(e) => (OutcomeStatus::Failed, None, Some(e.stage()), Some(e.to_string())),
        };
        OutcomeSummary {
            fname: self.fname.clone(),
            id: self.id.clone(),
            path: self.path.as_ref().map(|p| p.to_string_lossy().into_owned()),
            status,
            bytes,
            stage,
            error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Written,
    Planned,
    Failed,
}

/// Serializable view of a [`NoteOutcome`].
#[derive(Debug, Serialize)]
pub struct OutcomeSummary {
    pub fname: String,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub status: OutcomeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of one export batch: one outcome per requested note, in request
/// order.
#[derive(Debug)]
pub struct ExportReport {
    pub dest: PathBuf,
    pub dry_run: bool,
    pub outcomes: Vec<NoteOutcome>,
}

impl ExportReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn failures(&self) -> impl Iterator<Item = &NoteOutcome> {
        self.outcomes.iter().filter(|o| !o.is_ok())
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(NoteOutcome::is_ok)
    }

    /// Paths of notes that were written (or would be, for a dry run).
    pub fn paths(&self) -> Vec<&Path> {
        self.outcomes
            .iter()
            .filter(|o| o.is_ok())
            .filter_map(|o| o.path.as_deref())
            .collect()
    }

    /// Turn a report with failures into [`ExportError::BatchFailed`].
    pub fn into_result(self) -> Result<Self> {
        let failed = self.failures().count();
        if failed == 0 {
            Ok(self)
        } else {
            Err(ExportError::BatchFailed(failed, self.total()))
        }
    }

    pub fn summary(&self) -> ReportSummary {
        let failed = self.failures().count();
        ReportSummary {
            dest: self.dest.to_string_lossy().into_owned(),
            dry_run: self.dry_run,
            total: self.total(),
            succeeded: self.total() - failed,
            failed,
            notes: self.outcomes.iter().map(|o| o.summary(self.dry_run)).collect(),
        }
    }
}

/// Serializable view of an [`ExportReport`].
#[derive(Debug, Serialize)]
pub struct ReportSummary {
    pub dest: String,
    pub dry_run: bool,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub notes: Vec<OutcomeSummary>,
}
