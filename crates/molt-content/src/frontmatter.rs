//! Front matter extraction.
//!
//! Content files may start with a single JSON object holding the page
//! metadata. There is no delimiter token: the end of the block is found by
//! bracket balance, so `{"title": "Hi"}\n# Hi` splits cleanly into metadata
//! and body.

use serde_json::{Map, Value};

/// Extract the leading JSON metadata block from a content file.
///
/// Returns the parsed metadata object and the remaining body after the
/// block. A file that starts directly with markup gets an empty metadata
/// map and the full source as body.
pub fn extract_front_matter(
    source: &str,
) -> Result<(Map<String, Value>, &str), FrontMatterError> {
    let trimmed = source.trim_start();

    if !trimmed.starts_with('{') {
        return Ok((Map::new(), source));
    }

    let Some(end) = balanced_object_end(trimmed) else {
        return Err(FrontMatterError::Unclosed);
    };

    let block = &trimmed[..end];
    let body = &trimmed[end..];

    let metadata: Map<String, Value> = serde_json::from_str(block)
        .map_err(|e| FrontMatterError::InvalidJson(e.to_string()))?;

    Ok((metadata, body.trim_start_matches(['\r', '\n'])))
}

/// Find the byte offset just past the closing brace of the object opening
/// at the start of `source`, tracking string literals and escapes.
fn balanced_object_end(source: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in source.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + c.len_utf8());
                }
            }
            _ => {}
        }
    }

    None
}

/// Errors from front matter extraction.
#[derive(Debug, thiserror::Error)]
pub enum FrontMatterError {
    #[error("unclosed metadata block - braces never balance")]
    Unclosed,

    #[error("invalid JSON in metadata block: {0}")]
    InvalidJson(String),
}
