//! Content file parser.
//!
//! Splits a content file into a JSON front matter block and a Markdown
//! body, and converts the body to HTML.

pub mod frontmatter;
pub mod markdown;

use serde_json::{Map, Value};

pub use frontmatter::{extract_front_matter, FrontMatterError};
pub use markdown::to_html;

/// A parsed content document.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    /// Metadata from the front matter block (empty if absent)
    pub metadata: Map<String, Value>,

    /// Markdown body (without front matter)
    pub body: String,

    /// Body rendered to HTML
    pub body_html: String,
}

/// Parse a content document: extract front matter, render the body.
pub fn parse_document(source: &str) -> Result<ParsedDocument, FrontMatterError> {
    let (metadata, body) = extract_front_matter(source)?;
    let body_html = to_html(body);

    Ok(ParsedDocument {
        metadata,
        body: body.to_string(),
        body_html,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_document() {
        let source = "{\"title\": \"Hi\", \"template\": \"post.html\"}\n# Hi\n";

        let doc = parse_document(source).unwrap();

        assert_eq!(doc.metadata["title"], "Hi");
        assert_eq!(doc.metadata["template"], "post.html");
        assert_eq!(doc.body, "# Hi\n");
        assert!(doc.body_html.contains("<h1>Hi</h1>"));
    }

    #[test]
    fn parses_document_without_front_matter() {
        let doc = parse_document("# Bare\n").unwrap();

        assert!(doc.metadata.is_empty());
        assert!(doc.body_html.contains("<h1>Bare</h1>"));
    }
}
