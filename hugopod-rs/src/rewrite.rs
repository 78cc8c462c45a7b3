//! Rendering lexed body segments into Hugo syntax.
//!
//! Portals become `{{< dendron/portal "target" "anchor" >}}`, cross-references
//! become `{{< dendron/ref "Title" "target" >}}` and `assets/` image links are
//! made root-relative. The shortcode names are configurable.

use crate::parser::reference::{lex, Segment};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PORTAL_SHORTCODE: &str = "dendron/portal";
pub const DEFAULT_REF_SHORTCODE: &str = "dendron/ref";

/// Names of the Hugo shortcodes emitted for references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortcodes {
    pub portal: String,
    pub reference: String,
}

impl Default for Shortcodes {
    fn default() -> Self {
        Self {
            portal: DEFAULT_PORTAL_SHORTCODE.to_string(),
            reference: DEFAULT_REF_SHORTCODE.to_string(),
        }
    }
}

/// Which segment kinds get rewritten; the rest are copied from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rules {
    references: bool,
    assets: bool,
}

/// Rewrite portals, cross-references and asset links in one pass.
pub fn rewrite_body(body: &str, shortcodes: &Shortcodes) -> String {
    render(body, shortcodes, Rules { references: true, assets: true })
}

/// Rewrite only portals and cross-references.
pub fn rewrite_references(body: &str, shortcodes: &Shortcodes) -> String {
    render(body, shortcodes, Rules { references: true, assets: false })
}

/// Rewrite only `assets/` image links.
pub fn rewrite_asset_paths(body: &str) -> String {
    render(body, &Shortcodes::default(), Rules { references: false, assets: true })
}

fn render(body: &str, shortcodes: &Shortcodes, rules: Rules) -> String {
    let mut out = String::with_capacity(body.len() + body.len() / 4);

    for segment in lex(body) {
        match segment {
            Segment::Portal {
                target,
                anchor,
                trailing,
                ..
            } if rules.references => {
                let args: Vec<&str> = std::iter::once(target).chain(anchor).collect();
                push_shortcode(&mut out, &shortcodes.portal, &args);
                out.push_str(trailing);
            }
            Segment::CrossRef { title, target, .. } if rules.references => {
                let args: Vec<&str> = title.into_iter().chain(std::iter::once(target)).collect();
                push_shortcode(&mut out, &shortcodes.reference, &args);
            }
            Segment::Asset {
                alt, href, title, ..
            } if rules.assets => {
                out.push_str("![");
                out.push_str(alt);
                out.push_str("](");
                out.push_str(href);
                out.push_str(title.unwrap_or(""));
                out.push(')');
            }
            other => out.push_str(other.source()),
        }
    }

    out
}

/// Append `{{< name "arg" ... >}}`.
fn push_shortcode(out: &mut String, name: &str, args: &[&str]) {
    out.push_str("{{< ");
    out.push_str(name);
    for arg in args {
        out.push(' ');
        push_quoted(out, arg);
    }
    out.push_str(" >}}");
}

/// Append `arg` as a Go-style double-quoted string.
fn push_quoted(out: &mut String, arg: &str) {
    out.push('"');
    for c in arg.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
}
