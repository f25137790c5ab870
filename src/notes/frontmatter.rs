//! Frontmatter and tag extraction for notes.
//!
//! Stands in for the host's metadata cache: the YAML block at the top of a
//! note is parsed with serde_yaml, and tags are gathered from both the
//! frontmatter (`tags` / `tag`) and `#inline` tags in the body.

use regex::Regex;
use serde_yaml::{Mapping, Value};
use std::sync::LazyLock;

/// Parsed frontmatter mapping
pub type Frontmatter = Mapping;

/// Frontmatter key that carries the disable marker
pub const DISABLE_KEY: &str = "AutoNoteMover";
/// Value of [`DISABLE_KEY`] meaning "never auto-move this note"
pub const DISABLE_VALUE: &str = "disable";

static INLINE_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)#([\p{L}\p{N}_/-]+)").unwrap());

/// Frontmatter plus the tags derived from the whole note
#[derive(Debug, Clone, Default)]
pub struct ParsedNote {
    pub frontmatter: Option<Frontmatter>,
    pub tags: Vec<String>,
}

/// Parse a complete note file (frontmatter + body)
pub fn parse_note(content: &str) -> ParsedNote {
    let (yaml, body) = split_frontmatter(content);
    let frontmatter = yaml.and_then(parse_frontmatter);

    let mut tags: Vec<String> = Vec::new();
    let frontmatter_tags = frontmatter
        .as_ref()
        .map(frontmatter_tags)
        .unwrap_or_default();

    for tag in frontmatter_tags.into_iter().chain(extract_inline_tags(body)) {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    ParsedNote { frontmatter, tags }
}

/// Split content into (frontmatter_yaml, body).
///
/// The block must open on the very first line with `---` and close with a
/// later `---` line; anything else means the note has no frontmatter.
pub fn split_frontmatter(content: &str) -> (Option<&str>, &str) {
    let Some(rest) = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    else {
        return (None, content);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(yaml), body);
        }
        offset += line.len();
    }

    (None, content)
}

/// Parse the YAML block; an empty block yields an empty mapping
fn parse_frontmatter(yaml: &str) -> Option<Frontmatter> {
    match serde_yaml::from_str::<Value>(yaml) {
        Ok(Value::Mapping(map)) => Some(map),
        Ok(Value::Null) => Some(Mapping::new()),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!("Ignoring malformed frontmatter: {}", e);
            None
        }
    }
}

/// Whether the frontmatter carries `AutoNoteMover: disable`
pub fn is_disabled(frontmatter: &Frontmatter) -> bool {
    frontmatter
        .get(DISABLE_KEY)
        .and_then(Value::as_str)
        .map(|v| v.trim() == DISABLE_VALUE)
        .unwrap_or(false)
}

/// Tags declared in the `tags` / `tag` frontmatter keys, `#`-prefixed
pub fn frontmatter_tags(frontmatter: &Frontmatter) -> Vec<String> {
    let mut tags = Vec::new();

    for key in ["tags", "tag"] {
        match frontmatter.get(key) {
            Some(Value::Sequence(items)) => {
                for item in items {
                    if let Some(raw) = scalar_to_string(item) {
                        push_tag(&mut tags, &raw);
                    }
                }
            }
            Some(value) => {
                if let Some(raw) = scalar_to_string(value) {
                    for part in raw.split(|c: char| c == ',' || c.is_whitespace()) {
                        push_tag(&mut tags, part);
                    }
                }
            }
            None => {}
        }
    }

    tags
}

/// Extract #inline-tags from text, `#`-prefixed. Purely numeric tags are ignored.
pub fn extract_inline_tags(text: &str) -> Vec<String> {
    INLINE_TAG_RE
        .captures_iter(text)
        .map(|cap| cap[1].to_string())
        .filter(|tag| !tag.chars().all(|c| c.is_ascii_digit() || c == '/'))
        .map(|tag| format!("#{}", tag))
        .collect()
}

fn push_tag(tags: &mut Vec<String>, raw: &str) {
    let name = raw.trim().trim_start_matches('#');
    if name.is_empty() {
        return;
    }
    let tag = format!("#{}", name);
    if !tags.contains(&tag) {
        tags.push(tag);
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
