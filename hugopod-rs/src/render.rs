//! Body renderers.
//!
//! A renderer turns a note whose references were already rewritten into the
//! markdown body of the output file.

use crate::config::PodConfig;
use crate::note::Note;
use std::path::PathBuf;

/// Shared, read-only state handed to renderers.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub dest: PathBuf,
    pub config: PodConfig,
}

/// Produces the markdown body for a note.
///
/// Implementations must leave `{{< ... >}}` shortcodes alone; the exporter
/// rewrites references before calling the renderer.
pub trait BodyRenderer: Send + Sync {
    fn render(&self, note: &Note, ctx: &RenderContext) -> Result<String, String>;
}

/// Renders `# <title>` followed by the note body.
///
/// The title line is the one the exporter strips again; Hugo renders the
/// title from frontmatter.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl BodyRenderer for MarkdownRenderer {
    fn render(&self, note: &Note, _ctx: &RenderContext) -> Result<String, String> {
        let body = note.body.trim_start_matches(['\r', '\n']);
        Ok(format!("# {}\n\n{}", note.title, body))
    }
}

impl<F> BodyRenderer for F
where
    F: Fn(&Note, &RenderContext) -> Result<String, String> + Send + Sync,
{
    fn render(&self, note: &Note, ctx: &RenderContext) -> Result<String, String> {
        self(note, ctx)
    }
}
