//! The value-path mini language.
//!
//! A path selects into a decoded tree with dotted keys, bracketed indices,
//! and wildcards: `users[0].name`, `users[*].posts[0]`, `*.id`.

/// One step of a parsed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Descend into a map by key.
    Key(String),
    /// Descend into a list by 0-based index.
    Index(usize),
    /// Expand across all children of a map or list.
    Wildcard,
}

/// Parse a path string into an ordered sequence of steps.
///
/// The grammar is deliberately permissive; no path string is a parse
/// error:
///
/// - segments are delimited by `.` and `[...]`; empty segments (leading,
///   trailing, or consecutive dots) produce no step;
/// - a bare `*` segment is a wildcard; any other segment is a key, which
///   may contain any character except `.`, `[`, and `]`;
/// - bracket content is a decimal index or `*`; anything else (including
///   `[]`, `[-1]`, and digit runs that overflow `usize`) is silently
///   dropped;
/// - an unterminated bracket is treated as if closed at end of input.
///
/// ```
/// use dagcbor::{parse_path, Step};
///
/// assert_eq!(
///     parse_path("users[0].name"),
///     vec![
///         Step::Key("users".to_owned()),
///         Step::Index(0),
///         Step::Key("name".to_owned()),
///     ],
/// );
/// assert_eq!(parse_path("key[abc]"), vec![Step::Key("key".to_owned())]);
/// ```
#[must_use]
pub fn parse_path(path: &str) -> Vec<Step> {
    let mut steps = Vec::new();
    let bytes = path.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'.' | b']' => i += 1,
            b'[' => {
                let start = i + 1;
                let end = bytes[start..]
                    .iter()
                    .position(|&b| b == b']')
                    .map_or(bytes.len(), |p| start + p);
                if let Some(step) = bracket_step(&path[start..end]) {
                    steps.push(step);
                }
                // Past the closing bracket, or past the end if there was none.
                i = end + 1;
            }
            _ => {
                let start = i;
                while i < bytes.len() && !matches!(bytes[i], b'.' | b'[' | b']') {
                    i += 1;
                }
                let segment = &path[start..i];
                steps.push(if segment == "*" {
                    Step::Wildcard
                } else {
                    Step::Key(segment.to_owned())
                });
            }
        }
    }

    steps
}

/// Interpret the content between brackets; invalid content yields no step.
fn bracket_step(content: &str) -> Option<Step> {
    if content == "*" {
        return Some(Step::Wildcard);
    }
    if content.is_empty() || !content.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    content.parse().ok().map(Step::Index)
}
