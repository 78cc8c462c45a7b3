//! Mapping dotted note names to Hugo content paths.

use crate::error::{ExportError, Result};
use std::path::{Path, PathBuf};

/// File name Hugo uses for branch bundles.
pub const INDEX_STEM: &str = "_index";

/// Default content file extension.
pub const DEFAULT_EXTENSION: &str = "md";

/// Inputs that fully determine where a note is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteLocation<'a> {
    pub vault: &'a str,
    pub fname: &'a str,
    pub has_children: bool,
    pub is_root: bool,
}

/// `a.b.c` -> `a/b/c`. Empty segments from doubled or trailing dots are
/// dropped.
pub fn dot_to_path(fname: &str) -> PathBuf {
    fname.split('.').filter(|s| !s.is_empty()).collect()
}

/// Compute the output path of a note below `dest`.
///
/// - root note: `<dest>/<vault>/_index.<ext>`
/// - branch (has children): `<dest>/<vault>/a/b/c/_index.<ext>`
/// - leaf: `<dest>/<vault>/a/b/c.<ext>`
///
/// A non-root name without any non-empty segment (`""`, `"..."`) is an
/// [`ExportError::InvalidName`]; it would otherwise map onto the vault
/// directory itself.
pub fn output_path(dest: &Path, location: &NoteLocation<'_>, extension: &str) -> Result<PathBuf> {
    let vault_dir = dest.join(location.vault);

    if location.is_root {
        return Ok(vault_dir.join(format!("{}.{}", INDEX_STEM, extension)));
    }

    let relative = dot_to_path(location.fname);
    if relative.as_os_str().is_empty() {
        return Err(ExportError::InvalidName(location.fname.to_string()));
    }

    let nested = vault_dir.join(relative);
    if location.has_children {
        Ok(nested.join(format!("{}.{}", INDEX_STEM, extension)))
    } else {
        Ok(nested.with_extension(extension))
    }
}
