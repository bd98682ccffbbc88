//! Markdown to HTML conversion.

use pulldown_cmark::{html, Options, Parser};

/// Render a Markdown body to HTML.
///
/// Standard rules plus tables, footnotes, strikethrough and task lists.
/// No extension hooks: the body is converted as-is.
pub fn to_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let parser = Parser::new_ext(markdown, options);

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    html_output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_headings_and_emphasis() {
        let html = to_html("# Hi\n\nsome *emphasis*");

        assert!(html.contains("<h1>Hi</h1>"));
        assert!(html.contains("<em>emphasis</em>"));
    }

    #[test]
    fn renders_lists_links_and_code() {
        let html = to_html("- one\n- [two](https://example.com)\n\n```\ncode\n```");

        assert!(html.contains("<li>one</li>"));
        assert!(html.contains("<a href=\"https://example.com\">two</a>"));
        assert!(html.contains("<code>code\n</code>"));
    }

    #[test]
    fn renders_tables() {
        let html = to_html("| a | b |\n|---|---|\n| 1 | 2 |");

        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }
}
