//! Reading and writing `---` delimited YAML frontmatter blocks.

use crate::error::{ExportError, Result};
use serde_yaml::{Mapping, Value};
use std::path::Path;

/// The frontmatter delimiter line.
pub const DELIMITER: &str = "---";

/// A note file split into its frontmatter and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontmatterSplit<'a> {
    /// Raw YAML between the delimiters, if the file has a frontmatter block.
    pub yaml: Option<&'a str>,
    /// Everything after the closing delimiter line.
    pub body: &'a str,
}

/// Split note file content into frontmatter and body.
///
/// The block must open on the very first line. A file with an opening
/// delimiter but no closing one is treated as having no frontmatter.
pub fn split_frontmatter(content: &str) -> FrontmatterSplit<'_> {
    let no_frontmatter = FrontmatterSplit {
        yaml: None,
        body: content,
    };

    let Some(rest) = content.strip_prefix(DELIMITER) else {
        return no_frontmatter;
    };
    let Some(rest) = rest.strip_prefix('\n').or_else(|| rest.strip_prefix("\r\n")) else {
        return no_frontmatter;
    };

    // An empty block closes on the line right after the opener.
    if let Some(body) = strip_delimiter_line(rest) {
        return FrontmatterSplit {
            yaml: Some(""),
            body,
        };
    }

    let mut offset = 0;
    while let Some(pos) = rest[offset..].find('\n') {
        let line_start = offset + pos + 1;
        if let Some(body) = strip_delimiter_line(&rest[line_start..]) {
            let yaml = rest[..offset + pos].trim_end_matches('\r');
            return FrontmatterSplit {
                yaml: Some(yaml),
                body,
            };
        }
        offset = line_start;
    }

    no_frontmatter
}

/// If `text` starts with a delimiter line, return what follows it.
fn strip_delimiter_line(text: &str) -> Option<&str> {
    let after = text.strip_prefix(DELIMITER)?;
    if after.is_empty() {
        Some(after)
    } else if let Some(body) = after.strip_prefix('\n') {
        Some(body)
    } else {
        after.strip_prefix("\r\n")
    }
}

/// Parse the frontmatter block of a note file into a mapping.
///
/// Files without frontmatter yield an empty mapping. `path` is only used for
/// error messages.
pub fn parse_frontmatter(content: &str, path: &Path) -> Result<Mapping> {
    let invalid = |message: String| ExportError::InvalidFrontmatter {
        path: path.to_path_buf(),
        message,
    };

    match split_frontmatter(content).yaml {
        None => Ok(Mapping::new()),
        Some(yaml) if yaml.trim().is_empty() => Ok(Mapping::new()),
        Some(yaml) => match serde_yaml::from_str::<Value>(yaml).map_err(|e| invalid(e.to_string()))? {
            Value::Mapping(mapping) => Ok(mapping),
            Value::Null => Ok(Mapping::new()),
            _ => Err(invalid("frontmatter is not a mapping".to_string())),
        },
    }
}

/// Wrap serialized YAML between delimiter lines.
pub fn wrap_frontmatter(yaml: &str) -> String {
    let mut block = String::with_capacity(yaml.len() + 8);
    block.push_str(DELIMITER);
    block.push('\n');
    block.push_str(yaml);
    if !yaml.ends_with('\n') {
        block.push('\n');
    }
    block.push_str(DELIMITER);
    block.push('\n');
    block
}
