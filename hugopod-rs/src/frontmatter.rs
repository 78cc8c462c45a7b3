//! Building the Hugo frontmatter block for a note.

use crate::error::{ExportError, Result};
use crate::note::Note;
use serde_yaml::{Mapping, Value};
use tracing::warn;

/// Keys of the serialized note that never reach the frontmatter.
const EXCLUDED_KEYS: &[&str] = &["body", "custom"];

/// Build the frontmatter mapping for a note.
///
/// Starts from every note field except `body`, sets `date` from `created`,
/// then overlays the `custom` bag on top. Custom fields win on collisions.
pub fn build_frontmatter(note: &Note) -> Result<Mapping> {
    let value = serde_yaml::to_value(note).map_err(|source| ExportError::Frontmatter {
        fname: note.fname.clone(),
        source,
    })?;
    let mut base = expect_mapping(&note.fname, value)?;
    for key in EXCLUDED_KEYS {
        base.remove(*key);
    }

    let date = match note.created.to_iso() {
        Some(iso) => iso,
        None => {
            warn!(fname = %note.fname, created = %note.created, "unparseable created timestamp");
            note.created.to_string()
        }
    };
    base.insert(Value::from("date"), Value::from(date));

    Ok(overlay(base, note.custom.clone()))
}

/// The serialized note must be a mapping; anything else fails the note.
fn expect_mapping(fname: &str, value: Value) -> Result<Mapping> {
    match value {
        Value::Mapping(mapping) => Ok(mapping),
        other => Err(ExportError::Frontmatter {
            fname: fname.to_string(),
            source: serde::ser::Error::custom(format!(
                "note serialized to {:?}, expected a mapping",
                other
            )),
        }),
    }
}

/// Ordered merge: keys of `base` keep their position, `overlay` values
/// replace same-named entries, new overlay keys are appended.
pub fn overlay(mut base: Mapping, overlay: Mapping) -> Mapping {
    for (key, value) in overlay {
        match base.get_mut(&key) {
            Some(slot) => *slot = value,
            None => {
                base.insert(key, value);
            }
        }
    }
    base
}

/// Serialize a frontmatter mapping to YAML text (without delimiters).
pub fn serialize_frontmatter(fname: &str, mapping: &Mapping) -> Result<String> {
    serde_yaml::to_string(mapping).map_err(|source| ExportError::Frontmatter {
        fname: fname.to_string(),
        source,
    })
}

/// [`build_frontmatter`] followed by [`serialize_frontmatter`].
pub fn render_frontmatter(note: &Note) -> Result<String> {
    let mapping = build_frontmatter(note)?;
    serialize_frontmatter(&note.fname, &mapping)
}
