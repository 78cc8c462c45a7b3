//! Dendron vault reading and hierarchy building.

use crate::error::{ExportError, Result};
use crate::note::{parent_fname, Note};
use crate::types::VaultRef;
use glob::glob;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Name of the note at the top of every vault hierarchy.
pub const ROOT_FNAME: &str = "root";

/// A Dendron vault on disk: a flat directory of `a.b.c.md` files.
#[derive(Debug, Clone)]
pub struct Vault {
    /// Root path of the vault.
    pub root: PathBuf,

    /// Reference stamped onto every loaded note.
    pub vault: VaultRef,
}

impl Vault {
    /// Open a vault directory. `name` overrides the name derived from the
    /// directory.
    pub fn new(root: impl Into<PathBuf>, name: Option<&str>) -> Result<Self> {
        let root = root.into();

        if !root.is_dir() {
            return Err(ExportError::VaultNotFound(root));
        }

        let mut vault = VaultRef::new(root.to_string_lossy());
        if let Some(name) = name {
            vault = vault.with_name(name);
        }

        Ok(Self { root, vault })
    }

    pub fn name(&self) -> &str {
        self.vault.name()
    }

    /// List note files (relative paths), sorted. Hidden files are skipped.
    pub fn list_notes(&self) -> Result<Vec<PathBuf>> {
        let pattern = self.root.join("*.md");
        let pattern_str = pattern.to_string_lossy();

        let mut notes = Vec::new();

        for entry in glob(&pattern_str)? {
            match entry {
                Ok(path) => {
                    if let Ok(relative) = path.strip_prefix(&self.root) {
                        if !relative.to_string_lossy().starts_with('.') {
                            notes.push(relative.to_path_buf());
                        }
                    }
                }
                Err(e) => {
                    warn!("glob error: {}", e);
                }
            }
        }

        notes.sort();
        Ok(notes)
    }

    /// Load one note file.
    pub fn load_note(&self, relative_path: &Path) -> Result<Note> {
        let full_path = self.root.join(relative_path);
        let content = std::fs::read_to_string(&full_path)?;
        let fname = relative_path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ExportError::InvalidFrontmatter {
                path: relative_path.to_path_buf(),
                message: "note file name is not valid UTF-8".to_string(),
            })?;
        Note::parse(fname, &content, self.vault.clone(), relative_path)
    }

    /// Load every note and link them into a hierarchy, synthesizing stubs
    /// for missing ancestors. Notes come back sorted by fname.
    pub fn load_notes(&self) -> Result<Vec<Note>> {
        let paths = self.list_notes()?;
        debug!(vault = %self.name(), count = paths.len(), "loading notes");

        let notes = paths
            .iter()
            .map(|path| self.load_note(path))
            .collect::<Result<Vec<_>>>()?;

        Ok(build_hierarchy(notes, &self.vault))
    }
}

/// Fill in `parent` and `children` for a set of notes from their names.
///
/// Every name `a.b.c` gets a chain of ancestors `a.b` and `a`, created as
/// stubs when missing. Top-level names hang off [`ROOT_FNAME`], which is
/// also stubbed if absent. Children are ordered by fname.
pub fn build_hierarchy(notes: Vec<Note>, vault: &VaultRef) -> Vec<Note> {
    let mut by_fname: BTreeMap<String, Note> = BTreeMap::new();
    for mut note in notes {
        note.parent = None;
        note.children.clear();
        by_fname.insert(note.fname.clone(), note);
    }

    by_fname
        .entry(ROOT_FNAME.to_string())
        .or_insert_with(|| Note::stub(ROOT_FNAME, vault.clone()));

    let names: Vec<String> = by_fname.keys().cloned().collect();
    for name in &names {
        let mut current = name.as_str();
        while let Some(parent) = parent_fname(current) {
            if !by_fname.contains_key(parent) {
                debug!(fname = %parent, "creating stub");
                by_fname.insert(parent.to_string(), Note::stub(parent, vault.clone()));
            }
            current = parent;
        }
    }

    let ids: HashMap<String, String> = by_fname
        .iter()
        .map(|(fname, note)| (fname.clone(), note.id.clone()))
        .collect();

    let mut children: HashMap<String, Vec<String>> = HashMap::new();
    for (fname, note) in by_fname.iter_mut() {
        if fname == ROOT_FNAME {
            continue;
        }
        let parent = parent_fname(fname).unwrap_or(ROOT_FNAME);
        note.parent = ids.get(parent).cloned();
        children
            .entry(parent.to_string())
            .or_default()
            .push(note.id.clone());
    }

    for (fname, ids) in children {
        if let Some(parent) = by_fname.get_mut(&fname) {
            parent.children = ids;
        }
    }

    by_fname.into_values().collect()
}
