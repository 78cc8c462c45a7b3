//! Parsers for note file syntax.

pub mod frontmatter;
pub mod heading;
pub mod reference;

pub use frontmatter::{parse_frontmatter, split_frontmatter, wrap_frontmatter, FrontmatterSplit};
pub use heading::strip_title_heading;
pub use reference::{lex, Segment};
