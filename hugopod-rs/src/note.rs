//! Note representation.

use crate::error::{ExportError, Result};
use crate::parser::frontmatter::split_frontmatter;
use crate::parser::parse_frontmatter;
use crate::path::NoteLocation;
use crate::types::{Timestamp, VaultRef};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::path::Path;

/// A hierarchical note.
///
/// Field order here is the key order of the exported frontmatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub desc: String,

    #[serde(default)]
    pub updated: Timestamp,

    #[serde(default)]
    pub created: Timestamp,

    /// Dotted hierarchical name, e.g. `blog.posts.first`.
    pub fname: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// Ids of the direct children, ordered by fname.
    #[serde(default)]
    pub children: Vec<String>,

    pub vault: VaultRef,

    /// Placeholder for a missing ancestor in the hierarchy.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub stub: bool,

    #[serde(default)]
    pub custom: Mapping,

    #[serde(default)]
    pub body: String,
}

impl Note {
    /// Create an empty note with a fresh id and a title derived from the name.
    pub fn new(fname: impl Into<String>, vault: VaultRef) -> Self {
        let fname = fname.into();
        let now = Timestamp::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: default_title(&fname),
            desc: String::new(),
            updated: now.clone(),
            created: now,
            fname,
            parent: None,
            children: Vec::new(),
            vault,
            stub: false,
            custom: Mapping::new(),
            body: String::new(),
        }
    }

    /// Create a stub standing in for a missing ancestor.
    pub fn stub(fname: impl Into<String>, vault: VaultRef) -> Self {
        Self {
            stub: true,
            ..Self::new(fname, vault)
        }
    }

    /// Parse a note file. `fname` comes from the file stem.
    ///
    /// `id`, `title`, `desc`, `created` and `updated` map onto fields; any
    /// other frontmatter key is folded into `custom`.
    pub fn parse(fname: &str, content: &str, vault: VaultRef, path: &Path) -> Result<Self> {
        let mut frontmatter = parse_frontmatter(content, path)?;
        let body = split_frontmatter(content).body.to_string();

        let invalid = |message: String| ExportError::InvalidFrontmatter {
            path: path.to_path_buf(),
            message,
        };

        let mut note = Note::new(fname, vault);
        note.body = body;

        if let Some(id) = take_string(&mut frontmatter, "id") {
            note.id = id;
        }
        if let Some(title) = take_string(&mut frontmatter, "title") {
            note.title = title;
        }
        if let Some(desc) = take_string(&mut frontmatter, "desc") {
            note.desc = desc;
        }
        if let Some(value) = frontmatter.remove("created") {
            note.created = serde_yaml::from_value(value)
                .map_err(|e| invalid(format!("created: {}", e)))?;
        }
        if let Some(value) = frontmatter.remove("updated") {
            note.updated = serde_yaml::from_value(value)
                .map_err(|e| invalid(format!("updated: {}", e)))?;
        }

        let mut custom = match frontmatter.remove("custom") {
            None | Some(Value::Null) => Mapping::new(),
            Some(Value::Mapping(mapping)) => mapping,
            Some(_) => return Err(invalid("custom is not a mapping".to_string())),
        };
        // Remaining top-level keys become custom fields unless already set there.
        for (key, value) in frontmatter {
            if !custom.contains_key(&key) {
                custom.insert(key, value);
            }
        }
        note.custom = custom;

        Ok(note)
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_custom(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.custom.insert(Value::String(key.into()), value.into());
        self
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Inputs for [`crate::path::output_path`].
    pub fn location<'a>(&'a self, root_fname: &str) -> NoteLocation<'a> {
        NoteLocation {
            vault: self.vault.name(),
            fname: &self.fname,
            has_children: self.has_children(),
            is_root: self.fname == root_fname,
        }
    }
}

fn take_string(mapping: &mut Mapping, key: &str) -> Option<String> {
    match mapping.remove(key)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Last segment of a dotted name.
pub fn leaf_name(fname: &str) -> &str {
    fname.rsplit('.').next().unwrap_or(fname)
}

/// Dotted name of the direct parent, or `None` for a top-level name.
pub fn parent_fname(fname: &str) -> Option<&str> {
    fname.rsplit_once('.').map(|(parent, _)| parent)
}

/// Title for a note without one: the last name segment with its first
/// letter upper-cased.
pub fn default_title(fname: &str) -> String {
    let mut chars = leaf_name(fname).chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
