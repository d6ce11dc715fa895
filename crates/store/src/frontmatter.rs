//! YAML frontmatter codec: `raw ↔ {data, content}`.
//!
//! Parsing is permissive — a file with no `---` fence, or with a fence that
//! fails to parse as YAML, is treated as "no data, whole file is content"
//! rather than an error. Emission is strict: field order follows the
//! serializing struct's declaration order and every file ends in `\n`.

use gray_matter::engine::YAML;
use gray_matter::Matter;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrontmatterError {
    #[error("failed to render frontmatter: {0}")]
    Emit(#[from] serde_yaml::Error),
}

/// Result of parsing a raw file: the frontmatter, if any, plus the body.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFrontmatter {
    pub data: Option<Value>,
    pub content: String,
}

/// Parse raw file text into frontmatter data (as generic JSON) and body.
///
/// Unparseable or absent frontmatter yields `data: None` and the entire
/// input as `content` — this function never errors.
pub fn parse(raw: &str) -> ParsedFrontmatter {
    let matter = Matter::<YAML>::new();
    let parsed = matter.parse(raw);

    let data = parsed
        .data
        .and_then(|pod| pod.deserialize::<Value>().ok())
        .filter(|v| !v.is_null());

    ParsedFrontmatter {
        data,
        content: parsed.content,
    }
}

/// Parse raw text and deserialize the frontmatter into a typed struct.
///
/// Returns `None` when there is no frontmatter, or it doesn't match `T`.
pub fn parse_typed<T: serde::de::DeserializeOwned>(raw: &str) -> (Option<T>, String) {
    let parsed = parse(raw);
    let data = parsed.data.and_then(|v| serde_json::from_value(v).ok());
    (data, parsed.content)
}

/// Emit `{frontmatter, body}` as a raw file, `---`-fenced YAML followed by
/// the body. The file always ends with a trailing newline.
pub fn emit<T: Serialize>(data: &T, body: &str) -> Result<String, FrontmatterError> {
    let yaml = serde_yaml::to_string(data)?;
    let mut out = String::with_capacity(yaml.len() + body.len() + 16);
    out.push_str("---\n");
    out.push_str(yaml.trim_end());
    out.push_str("\n---\n");
    out.push_str(body);
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
#[path = "frontmatter_tests.rs"]
mod tests;
