//! Single-pass lexer for note references in raw body text.
//!
//! The body is split into a stream of [`Segment`]s. Every byte of the input
//! belongs to exactly one segment, and concatenating [`Segment::source`] of
//! all segments reproduces the input. Rendering happens separately in
//! [`crate::rewrite`], so rewritten output is never scanned again.

use regex::Regex;
use std::sync::LazyLock;

// One alternation, tried left to right at each position:
//   portal    - ![[inner]] followed by a whitespace character (group `pws`)
//   verbatim  - ![[inner]] with anything else after it; kept as text so the
//               cross-reference branch cannot pick up its inner brackets
//   xref      - [[inner]]
//   asset     - ![alt](assets/<rest>) with an optional "title"; `assets`
//               must be a whole path segment
// Inner spans stay on one line and may not contain brackets, so
// `[[a [[b]]` only matches `[[b]]`.
static REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"!\[\[(?P<portal>[^\[\]\n]+)\]\](?P<pws>\s)",
        r"|(?P<verbatim>!\[\[[^\[\]\n]+\]\])",
        r"|\[\[(?P<xref>[^\[\]\n]+)\]\]",
        r#"|!\[(?P<alt>[^\[\]]*)\]\(assets(?P<href>/[^()\s]*)(?P<title>\s+"[^"\n]*")?\)"#,
    ))
    .unwrap()
});

/// A lexed piece of a note body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text passed through unchanged.
    Text(&'a str),

    /// An embedded note: `![[target#anchor]]` plus the whitespace after it.
    Portal {
        source: &'a str,
        target: &'a str,
        anchor: Option<&'a str>,
        trailing: &'a str,
    },

    /// A link to another note: `[[target]]` or `[[Title|target]]`.
    CrossRef {
        source: &'a str,
        title: Option<&'a str>,
        target: &'a str,
    },

    /// An image whose href starts with the `assets/` folder. `href` is the
    /// remainder after `assets`, starting with `/`. `title` is the raw
    /// ` "Title"` part, leading whitespace included.
    Asset {
        source: &'a str,
        alt: &'a str,
        href: &'a str,
        title: Option<&'a str>,
    },
}

impl<'a> Segment<'a> {
    /// The exact input text this segment was lexed from.
    pub fn source(&self) -> &'a str {
        match self {
            Segment::Text(text) => text,
            Segment::Portal { source, .. }
            | Segment::CrossRef { source, .. }
            | Segment::Asset { source, .. } => source,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Segment::Text(_))
    }
}

/// Lex a body into segments in one left-to-right pass.
pub fn lex(body: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for cap in REFERENCE.captures_iter(body) {
        let whole = cap.get(0).unwrap();

        let segment = if let Some(inner) = cap.name("portal") {
            let trailing = cap.name("pws").map(|m| m.as_str()).unwrap_or("");
            let (target, anchor) = split_anchor(inner.as_str());
            Segment::Portal {
                source: whole.as_str(),
                target,
                anchor,
                trailing,
            }
        } else if let Some(inner) = cap.name("xref") {
            let (title, target) = split_title(inner.as_str());
            Segment::CrossRef {
                source: whole.as_str(),
                title,
                target,
            }
        } else if let Some(href) = cap.name("href") {
            Segment::Asset {
                source: whole.as_str(),
                alt: cap.name("alt").map(|m| m.as_str()).unwrap_or(""),
                href: href.as_str(),
                title: cap.name("title").map(|m| m.as_str()),
            }
        } else {
            // Portal without trailing whitespace stays in the text run.
            continue;
        };

        if whole.start() > last {
            segments.push(Segment::Text(&body[last..whole.start()]));
        }
        segments.push(segment);
        last = whole.end();
    }

    if last < body.len() {
        segments.push(Segment::Text(&body[last..]));
    }

    segments
}

/// `target#anchor` -> (`target`, Some(`anchor`)). An empty anchor is dropped.
fn split_anchor(inner: &str) -> (&str, Option<&str>) {
    match inner.split_once('#') {
        Some((target, anchor)) if !anchor.is_empty() => (target, Some(anchor)),
        Some((target, _)) => (target, None),
        None => (inner, None),
    }
}

/// `Title|target` -> (Some(`Title`), `target`). An empty title is dropped.
fn split_title(inner: &str) -> (Option<&str>, &str) {
    match inner.split_once('|') {
        Some((title, target)) if !title.is_empty() => (Some(title), target),
        Some((_, target)) => (None, target),
        None => (None, inner),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn concat(segments: &[Segment<'_>]) -> String {
        segments.iter().map(Segment::source).collect()
    }

    #[test]
    fn test_plain_text() {
        let segments = lex("no references here");
        assert_eq!(segments, vec![Segment::Text("no references here")]);
    }

    #[test]
    fn test_empty_body() {
        assert!(lex("").is_empty());
    }

    #[test]
    fn test_portal_with_anchor() {
        let body = "see ![[note#sec]] here";
        let segments = lex(body);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], Segment::Text("see "));
        assert_eq!(
            segments[1],
            Segment::Portal {
                source: "![[note#sec]] ",
                target: "note",
                anchor: Some("sec"),
                trailing: " ",
            }
        );
        assert_eq!(segments[2], Segment::Text("here"));
        assert_eq!(concat(&segments), body);
    }

    #[test]
    fn test_portal_requires_trailing_whitespace() {
        let body = "end ![[note]]";
        let segments = lex(body);
        assert_eq!(segments, vec![Segment::Text(body)]);

        let body = "![[note]], then text";
        let segments = lex(body);
        assert!(segments.iter().all(Segment::is_text));
        assert_eq!(concat(&segments), body);
    }

    #[test]
    fn test_portal_newline_terminated() {
        let segments = lex("![[daily.journal]]\nnext line");
        match &segments[0] {
            Segment::Portal { target, anchor, trailing, .. } => {
                assert_eq!(*target, "daily.journal");
                assert!(anchor.is_none());
                assert_eq!(*trailing, "\n");
            }
            other => panic!("expected portal, got {:?}", other),
        }
    }

    #[test]
    fn test_cross_ref_plain() {
        let segments = lex("a [[target.page]] b");
        assert_eq!(
            segments[1],
            Segment::CrossRef {
                source: "[[target.page]]",
                title: None,
                target: "target.page",
            }
        );
    }

    #[test]
    fn test_cross_ref_with_title() {
        let segments = lex("a [[My Title|target.page]] b");
        assert_eq!(
            segments[1],
            Segment::CrossRef {
                source: "[[My Title|target.page]]",
                title: Some("My Title"),
                target: "target.page",
            }
        );
    }

    #[test]
    fn test_cross_ref_at_start_of_body() {
        let segments = lex("[[first]] word");
        assert!(matches!(segments[0], Segment::CrossRef { target: "first", .. }));
    }

    #[test]
    fn test_cross_ref_keeps_anchor_in_target() {
        let segments = lex("[[page#intro]]");
        assert!(matches!(segments[0], Segment::CrossRef { target: "page#intro", .. }));
    }

    #[test]
    fn test_adjacent_refs() {
        let body = "[[a]][[b]] ![[c]] ![[d]] ";
        let segments = lex(body);
        let kinds: Vec<&str> = segments
            .iter()
            .map(|s| match s {
                Segment::Text(_) => "text",
                Segment::Portal { .. } => "portal",
                Segment::CrossRef { .. } => "xref",
                Segment::Asset { .. } => "asset",
            })
            .collect();
        assert_eq!(kinds, vec!["xref", "xref", "text", "portal", "portal"]);
        assert_eq!(concat(&segments), body);
    }

    #[test]
    fn test_malformed_brackets_left_alone() {
        let body = "[[unclosed and [single] and ]] stray";
        let segments = lex(body);
        assert_eq!(segments, vec![Segment::Text(body)]);
    }

    #[test]
    fn test_nested_open_brackets_match_innermost() {
        let segments = lex("[[outer [[inner]]");
        assert_eq!(segments[0], Segment::Text("[[outer "));
        assert!(matches!(segments[1], Segment::CrossRef { target: "inner", .. }));
    }

    #[test]
    fn test_asset_link() {
        let segments = lex("![alt](assets/img.png)");
        assert_eq!(
            segments,
            vec![Segment::Asset {
                source: "![alt](assets/img.png)",
                alt: "alt",
                href: "/img.png",
                title: None,
            }]
        );
    }

    #[test]
    fn test_asset_link_with_title() {
        let segments = lex(r#"![x](assets/img.png "Caption")"#);
        assert_eq!(
            segments,
            vec![Segment::Asset {
                source: r#"![x](assets/img.png "Caption")"#,
                alt: "x",
                href: "/img.png",
                title: Some(r#" "Caption""#),
            }]
        );
    }

    #[test]
    fn test_assets_must_be_whole_segment() {
        for body in ["![x](assets_old/img.png)", "![x](assetsassets/img.png)", "![x](assets)"] {
            assert_eq!(lex(body), vec![Segment::Text(body)]);
        }
    }

    #[test]
    fn test_non_asset_image_untouched() {
        let body = "![alt](images/img.png) and ![x](https://example.com/assets/y.png)";
        assert_eq!(lex(body), vec![Segment::Text(body)]);
    }

    #[test]
    fn test_source_roundtrip_mixed() {
        let body = "# Title\n\n![[a.b#c]] and [[T|x.y]] with ![pic](assets/p.png)\n![[tail]]";
        assert_eq!(concat(&lex(body)), body);
    }
}
