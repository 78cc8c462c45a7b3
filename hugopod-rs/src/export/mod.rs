//! Exporting notes to a static site content tree.
//!
//! [`HugoExporter`] runs the per-note pipeline (frontmatter, reference
//! rewriting, body rendering, path mapping) and writes the results, one
//! task per note.

mod hugo;
mod report;

pub use hugo::{write_prepared, HugoExporter, PreparedNote};
pub use report::{ExportReport, NoteOutcome, OutcomeStatus, OutcomeSummary, ReportSummary};
