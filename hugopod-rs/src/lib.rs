//! Hugopod - export Dendron vaults as Hugo content.
//!
//! # Overview
//!
//! Every note of a vault becomes one markdown file under
//! `<dest>/<vault name>/`, with:
//! - YAML frontmatter built from the note's metadata plus its `custom` fields
//! - Note references (`![[portal]]`, `[[Title|target]]`) rewritten to Hugo
//!   shortcodes
//! - `assets/...` image links made site-absolute
//!
//! Notes are exported concurrently; one failing note does not stop the rest.
//!
//! # Example
//!
//! ```no_run
//! use hugopod::{ExportRequest, HugoExporter, PodConfig, Vault};
//!
//! # async fn run() -> hugopod::Result<()> {
//! let vault = Vault::new("/path/to/vault", Some("garden"))?;
//! let exporter = HugoExporter::new(PodConfig::new("root", "garden"));
//! let notes = exporter.select_notes(vault.load_notes()?);
//!
//! let report = exporter.export(ExportRequest::new("site/content", notes)).await;
//! for path in report.paths() {
//!     println!("{}", path.display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod frontmatter;
pub mod note;
pub mod parser;
pub mod path;
pub mod render;
pub mod rewrite;
pub mod types;
pub mod vault;

// Re-export main types at crate root
pub use config::PodConfig;
pub use error::{ExportError, Result};
pub use export::{ExportReport, HugoExporter, NoteOutcome};
pub use note::Note;
pub use render::{BodyRenderer, MarkdownRenderer, RenderContext};
pub use types::*;
pub use vault::Vault;
