//! Exporting notes as a Hugo content tree.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::fs;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::config::PodConfig;
use crate::error::{ExportError, Result};
use crate::export::report::{ExportReport, NoteOutcome};
use crate::frontmatter::render_frontmatter;
use crate::note::Note;
use crate::parser::{strip_title_heading, wrap_frontmatter};
use crate::path::output_path;
use crate::render::{BodyRenderer, MarkdownRenderer, RenderContext};
use crate::rewrite::{rewrite_body, Shortcodes};
use crate::types::ExportRequest;

/// A fully rendered note, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedNote {
    pub fname: String,
    pub id: String,
    pub path: PathBuf,
    pub content: String,
}

/// Turns notes into Hugo content files.
///
/// Cloning is cheap; every export task holds its own clone.
#[derive(Clone)]
pub struct HugoExporter {
    config: PodConfig,
    shortcodes: Shortcodes,
    renderer: Arc<dyn BodyRenderer>,
}

impl HugoExporter {
    /// Exporter using [`MarkdownRenderer`] for bodies.
    pub fn new(config: PodConfig) -> Self {
        Self::with_renderer(config, Arc::new(MarkdownRenderer))
    }

    pub fn with_renderer(config: PodConfig, renderer: Arc<dyn BodyRenderer>) -> Self {
        let shortcodes = config.shortcodes();
        Self {
            config,
            shortcodes,
            renderer,
        }
    }

    pub fn config(&self) -> &PodConfig {
        &self.config
    }

    /// Drop stub notes unless the config asks for them.
    pub fn select_notes(&self, notes: Vec<Note>) -> Vec<Note> {
        if self.config.include_stubs {
            notes
        } else {
            notes.into_iter().filter(|n| !n.stub).collect()
        }
    }

    /// Compute a note's output path and file content without touching disk.
    pub fn prepare(&self, note: &Note, ctx: &RenderContext) -> Result<PreparedNote> {
        let frontmatter = render_frontmatter(note)?;

        let mut rewritten = note.clone();
        rewritten.body = rewrite_body(&note.body, &self.shortcodes);

        let rendered = self
            .renderer
            .render(&rewritten, ctx)
            .map_err(|message| ExportError::Render {
                fname: note.fname.clone(),
                message,
            })?;
        let stripped = strip_title_heading(&rendered);
        let body = stripped.trim_start_matches(['\r', '\n']);

        let content = format!("{}\n{}", wrap_frontmatter(&frontmatter), body);
        let path = output_path(&ctx.dest, &note.location(&self.config.fname), &self.config.extension)?;

        Ok(PreparedNote {
            fname: note.fname.clone(),
            id: note.id.clone(),
            path,
            content,
        })
    }

    /// Prepare every note of a request without writing anything.
    pub fn plan(&self, request: &ExportRequest) -> ExportReport {
        let ctx = self.context(request);
        let outcomes = request
            .notes
            .iter()
            .map(|note| match self.prepare(note, &ctx) {
                Ok(prepared) => NoteOutcome {
                    fname: prepared.fname,
                    id: prepared.id,
                    path: Some(prepared.path),
                    result: Ok(prepared.content.len()),
                },
                Err(e) => failed(note, None, e),
            })
            .collect();

        ExportReport {
            dest: request.dest.clone(),
            dry_run: true,
            outcomes,
        }
    }

    /// Export every note of a request concurrently.
    ///
    /// Each note runs as its own task. A failing note does not stop the
    /// others; every note gets an outcome, reported in request order. Files
    /// already written are left in place.
    pub async fn export(&self, request: ExportRequest) -> ExportReport {
        let ctx = Arc::new(self.context(&request));
        let ExportRequest { dest, notes } = request;
        info!(notes = notes.len(), dest = %dest.display(), "exporting");

        let heads: Vec<(String, String)> = notes
            .iter()
            .map(|n| (n.fname.clone(), n.id.clone()))
            .collect();

        let mut tasks = JoinSet::new();
        for (index, note) in notes.into_iter().enumerate() {
            let exporter = self.clone();
            let ctx = Arc::clone(&ctx);
            tasks.spawn(async move { (index, exporter.export_note(note, &ctx).await) });
        }

        let mut slots: Vec<Option<NoteOutcome>> = heads.iter().map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, outcome)) => slots[index] = Some(outcome),
                Err(e) => warn!("export task did not complete: {}", e),
            }
        }

        let outcomes: Vec<NoteOutcome> = slots
            .into_iter()
            .zip(heads)
            .map(|(slot, (fname, id))| {
                slot.unwrap_or_else(|| NoteOutcome {
                    result: Err(ExportError::Task {
                        fname: fname.clone(),
                        message: "task panicked or was cancelled".to_string(),
                    }),
                    fname,
                    id,
                    path: None,
                })
            })
            .collect();

        let report = ExportReport {
            dest,
            dry_run: false,
            outcomes,
        };
        info!(
            total = report.total(),
            failed = report.failures().count(),
            "export finished"
        );
        report
    }

    async fn export_note(&self, note: Note, ctx: &RenderContext) -> NoteOutcome {
        let prepared = match self.prepare(&note, ctx) {
            Ok(prepared) => prepared,
            Err(e) => {
                warn!(fname = %note.fname, stage = e.stage(), "{}", e);
                return failed(&note, None, e);
            }
        };

        match write_prepared(&prepared).await {
            Ok(()) => NoteOutcome {
                result: Ok(prepared.content.len()),
                fname: prepared.fname,
                id: prepared.id,
                path: Some(prepared.path),
            },
            Err(e) => {
                warn!(fname = %note.fname, stage = e.stage(), "{}", e);
                failed(&note, Some(prepared.path), e)
            }
        }
    }

    fn context(&self, request: &ExportRequest) -> RenderContext {
        RenderContext {
            dest: request.dest.clone(),
            config: self.config.clone(),
        }
    }
}

fn failed(note: &Note, path: Option<PathBuf>, error: ExportError) -> NoteOutcome {
    NoteOutcome {
        fname: note.fname.clone(),
        id: note.id.clone(),
        path,
        result: Err(error),
    }
}

/// Create the parent directories of a prepared note and write it,
/// overwriting any existing file.
pub async fn write_prepared(prepared: &PreparedNote) -> Result<()> {
    if let Some(parent) = prepared.path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|source| ExportError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    fs::write(&prepared.path, &prepared.content)
        .await
        .map_err(|source| ExportError::Write {
            path: prepared.path.clone(),
            source,
        })?;

    debug!(path = %prepared.path.display(), "wrote note");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Timestamp, VaultRef};
    use crate::vault::build_hierarchy;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn vault() -> VaultRef {
        VaultRef::new("vaults/mysite")
    }

    fn note(fname: &str, id: &str, body: &str) -> Note {
        let mut note = Note::new(fname, vault()).with_body(body);
        note.id = id.to_string();
        note.created = Timestamp::Millis(1_609_459_200_000);
        note.updated = Timestamp::Millis(1_609_459_200_000);
        note
    }

    fn ctx(dest: &str) -> RenderContext {
        RenderContext {
            dest: PathBuf::from(dest),
            config: PodConfig::new("root", "mysite"),
        }
    }

    #[test]
    fn test_prepare_leaf_note() {
        let exporter = HugoExporter::new(PodConfig::new("root", "mysite"));
        let note = note("a.b.c", "c1", "See ![[x.y#part]] and [[Label|z]].");
        let prepared = exporter.prepare(&note, &ctx("/dest")).unwrap();

        assert_eq!(prepared.path, PathBuf::from("/dest/mysite/a/b/c.md"));
        assert!(prepared.content.starts_with("---\nid: c1\n"));
        assert!(prepared.content.contains("\n---\n\n"));
        assert!(prepared.content.contains("date: "));
        assert!(prepared.content.ends_with(
            "---\n\nSee {{< dendron/portal \"x.y\" \"part\" >}} and {{< dendron/ref \"Label\" \"z\" >}}."
        ));
        assert!(!prepared.content.contains("# C"));
    }

    #[test]
    fn test_prepare_strips_only_renderer_title() {
        let exporter = HugoExporter::new(PodConfig::new("root", "mysite"));
        let note = note("doc", "d1", "# Inner heading\n\ntext");
        let prepared = exporter.prepare(&note, &ctx("/dest")).unwrap();
        let body = prepared.content.split("\n---\n\n").nth(1).unwrap();
        assert_eq!(body, "# Inner heading\n\ntext");
    }

    #[test]
    fn test_prepare_root_and_branch_paths() {
        let exporter = HugoExporter::new(PodConfig::new("root", "mysite"));
        let notes = build_hierarchy(
            vec![note("root", "r", ""), note("blog", "b", ""), note("blog.post", "p", "")],
            &vault(),
        );
        let paths: Vec<PathBuf> = notes
            .iter()
            .map(|n| exporter.prepare(n, &ctx("/d")).unwrap().path)
            .collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/d/mysite/blog/_index.md"),
                PathBuf::from("/d/mysite/blog/post.md"),
                PathBuf::from("/d/mysite/_index.md"),
            ]
        );
    }

    #[test]
    fn test_render_failure_is_attributed() {
        let renderer = |_: &Note, _: &RenderContext| -> std::result::Result<String, String> {
            Err("renderer exploded".to_string())
        };
        let exporter = HugoExporter::with_renderer(PodConfig::new("root", "mysite"), Arc::new(renderer));
        let err = exporter.prepare(&note("a", "1", "x"), &ctx("/d")).unwrap_err();
        assert_eq!(err.stage(), "render");
        assert!(err.to_string().contains("renderer exploded"));
    }

    #[test]
    fn test_name_without_segments_is_not_written() {
        let exporter = HugoExporter::new(PodConfig::new("root", "mysite"));
        let err = exporter.prepare(&note("..", "1", "x"), &ctx("/d")).unwrap_err();
        assert_eq!(err.stage(), "path");
    }

    #[test]
    fn test_renderer_sees_rewritten_body() {
        let renderer = |note: &Note, _: &RenderContext| -> std::result::Result<String, String> {
            assert!(!note.body.contains("[["));
            Ok(note.body.clone())
        };
        let exporter = HugoExporter::with_renderer(PodConfig::new("root", "mysite"), Arc::new(renderer));
        let prepared = exporter.prepare(&note("a", "1", "[[b]]"), &ctx("/d")).unwrap();
        assert!(prepared.content.ends_with("{{< dendron/ref \"b\" >}}"));
    }

    #[test]
    fn test_select_notes_filters_stubs() {
        let notes = vec![note("a", "1", ""), Note::stub("b", vault())];
        let exporter = HugoExporter::new(PodConfig::new("root", "mysite"));
        assert_eq!(exporter.select_notes(notes.clone()).len(), 1);

        let mut config = PodConfig::new("root", "mysite");
        config.include_stubs = true;
        assert_eq!(HugoExporter::new(config).select_notes(notes).len(), 2);
    }

    #[test]
    fn test_plan_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let exporter = HugoExporter::new(PodConfig::new("root", "mysite"));
        let request = ExportRequest::new(dir.path(), vec![note("a", "1", "x")]);
        let report = exporter.plan(&request);
        assert!(report.dry_run);
        assert!(report.is_success());
        assert!(!dir.path().join("mysite").exists());
    }

    #[tokio::test]
    async fn test_export_writes_every_note() {
        let dir = TempDir::new().unwrap();
        let exporter = HugoExporter::new(PodConfig::new("root", "mysite"));
        let notes = build_hierarchy(
            vec![
                note("root", "r", "Welcome"),
                note("blog", "b", "Posts"),
                note("blog.post", "p", "![[blog#intro]] text"),
            ],
            &vault(),
        );
        let request = ExportRequest::new(dir.path(), notes);
        let report = exporter.export(request).await;

        assert!(report.is_success());
        assert_eq!(report.total(), 3);
        for path in report.paths() {
            let content = std::fs::read_to_string(path).unwrap();
            assert!(content.starts_with("---\n"));
            assert!(content.contains("\n---\n\n"));
        }
        let post = std::fs::read_to_string(dir.path().join("mysite/blog/post.md")).unwrap();
        assert!(post.ends_with("{{< dendron/portal \"blog\" \"intro\" >}} text"));
    }

    #[tokio::test]
    async fn test_export_collects_failures() {
        let dir = TempDir::new().unwrap();
        // A file where the vault directory should be makes every write fail.
        std::fs::write(dir.path().join("mysite"), "blocker").unwrap();

        let exporter = HugoExporter::new(PodConfig::new("root", "mysite"));
        let request = ExportRequest::new(dir.path(), vec![note("a", "1", ""), note("b", "2", "")]);
        let report = exporter.export(request).await;

        assert_eq!(report.total(), 2);
        assert_eq!(report.failures().count(), 2);
        assert_eq!(report.outcomes[0].fname, "a");
        assert_eq!(report.outcomes[1].fname, "b");
        assert!(report.outcomes.iter().all(|o| o.error().map(ExportError::stage) == Some("create-dir")));
    }
}
