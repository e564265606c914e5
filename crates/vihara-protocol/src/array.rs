//! The PostgreSQL-style array literal used for `text[]` columns.
//!
//! Encoding always quotes every element:
//!
//! ```text
//! ["a", "b,c", "say \"hi\""]  →  {"a","b,c","say \"hi\""}
//! ```
//!
//! Decoding is a small two-state scanner (`Outside` / `InQuotes`). It is
//! lenient on purpose: rows written by older code or edited by hand must
//! still load, so unbalanced quotes or stray braces degrade to a best-effort
//! split instead of an error.

/// The literal for an empty array.
pub const EMPTY_LITERAL: &str = "{}";

/// Encodes a list of strings as an array literal.
///
/// Every element is wrapped in double quotes. Inside an element, `"` and
/// `\` are escaped with a backslash, which is also what PostgreSQL emits
/// when it renders a `text[]` value.
///
/// Empty and whitespace-only elements are left out, since
/// [`decode_array_literal`] would drop them anyway.
///
/// ```rust
/// use vihara_protocol::encode_array_literal;
///
/// assert_eq!(encode_array_literal::<&str>(&[]), "{}");
/// assert_eq!(encode_array_literal(&["a,b"]), r#"{"a,b"}"#);
/// assert_eq!(encode_array_literal(&[r#"a"b"#]), r#"{"a\"b"}"#);
/// assert_eq!(encode_array_literal(&["a", "", "  "]), r#"{"a"}"#);
/// ```
pub fn encode_array_literal<S: AsRef<str>>(items: &[S]) -> String {
    let body_len: usize = items.iter().map(|s| s.as_ref().len() + 3).sum();
    let mut out = String::with_capacity(body_len + 2);
    out.push('{');
    let mut first = true;
    for item in items.iter().map(AsRef::as_ref) {
        if item.trim().is_empty() {
            continue;
        }
        if !first {
            out.push(',');
        }
        first = false;
        out.push('"');
        for c in item.chars() {
            if c == '"' || c == '\\' {
                out.push('\\');
            }
            out.push(c);
        }
        out.push('"');
    }
    out.push('}');
    out
}

/// Where the scanner is relative to a quoted section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Outside,
    InQuotes,
}

impl ScanState {
    fn toggle(self) -> Self {
        match self {
            Self::Outside => Self::InQuotes,
            Self::InQuotes => Self::Outside,
        }
    }
}

/// Decodes an array literal into its elements.
///
/// Rules, in the order the scanner applies them:
///
/// 1. `""` or `{}` decode to an empty list.
/// 2. All leading and trailing `{` / `}` characters are trimmed.
/// 3. `\x` appends `x` literally; `""` appends a single `"`.
/// 4. A lone `"` toggles the quote state and is dropped.
/// 5. `,` outside quotes ends an element.
/// 6. Each element is whitespace-trimmed; empty elements are skipped.
///
/// Never fails. An unterminated quote simply swallows the rest of the
/// input into the last element.
///
/// ```rust
/// use vihara_protocol::decode_array_literal;
///
/// assert_eq!(decode_array_literal(r#"{"a,b",c}"#), vec!["a,b", "c"]);
/// assert!(decode_array_literal("{}").is_empty());
/// ```
pub fn decode_array_literal(text: &str) -> Vec<String> {
    if text.is_empty() || text == EMPTY_LITERAL {
        return Vec::new();
    }

    let body = text.trim_matches(|c| c == '{' || c == '}');
    let mut items = Vec::new();
    let mut current = String::new();
    let mut state = ScanState::Outside;
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped) => current.push(escaped),
                // A trailing backslash has nothing to escape; keep it.
                None => current.push('\\'),
            },
            '"' if chars.peek() == Some(&'"') => {
                chars.next();
                current.push('"');
            }
            '"' => state = state.toggle(),
            ',' if state == ScanState::Outside => flush(&mut current, &mut items),
            other => current.push(other),
        }
    }
    flush(&mut current, &mut items);

    items
}

/// Moves the buffered element into `items` if it is non-blank.
fn flush(current: &mut String, items: &mut Vec<String>) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        items.push(trimmed.to_string());
    }
    current.clear();
}
