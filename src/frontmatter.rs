//! Front-matter parsing for content files.
//!
//! Articles and album config files may carry a metadata header delimited by
//! two lines containing exactly `---`, followed by the free-form body:
//!
//! ```text
//! ---
//! title: Shore leave
//! date: 2024-06-01
//! tags: [travel, "film, 35mm", sea]
//! ---
//! Body text starts here.
//! ```
//!
//! The block is a restricted key-value notation, not full YAML: one
//! `key: value` per line, no nesting, no multi-line values. Values are
//! coerced in a fixed order — bracketed list, quoted string, boolean,
//! number, raw string — see [`Value`].
//!
//! ## Degradation contract
//!
//! Parsing never fails. A document with no opening `---` in its first three
//! lines, or no closing `---` at all, yields the entire input as the body
//! and an empty metadata map. Callers supply collection-specific defaults
//! for absent keys; [`Document::has_front_matter`] records whether a block
//! was actually found, so "everything defaulted" is observable.

use std::collections::BTreeMap;

/// A coerced metadata value.
///
/// Coercion order, first match wins:
/// 1. `[a, b, c]` → [`Value::List`] (commas inside matching quotes do not
///    split; items are trimmed and unquoted; empty items are dropped)
/// 2. `"text"` or `'text'` → [`Value::Str`] with quotes stripped
/// 3. `true` / `false` → [`Value::Bool`]
/// 4. anything `f64` can parse (finite) → [`Value::Number`]
/// 5. the raw trimmed text → [`Value::Str`]
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    List(Vec<String>),
    Bool(bool),
    Number(f64),
}

impl Value {
    /// Render the value as display text for string-typed manifest fields.
    ///
    /// Lists join on `", "`; numbers drop a trailing `.0`.
    pub fn display_string(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            Value::List(items) => items.join(", "),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
        }
    }

    /// Truthiness for optional fields, mirroring the manifest format's
    /// "empty means absent" convention: empty string, `false`, and `0`
    /// all count as absent.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0,
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Parsed metadata block: ordered key → coerced value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata(BTreeMap<String, Value>);

impl Metadata {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// String field with a default: absent or non-truthy → the default.
    pub fn str_or(&self, key: &str, default: &str) -> String {
        match self.0.get(key) {
            Some(v) if v.is_truthy() => v.display_string(),
            _ => default.to_string(),
        }
    }

    /// List field: a list value is taken as-is; a truthy scalar becomes a
    /// one-element list; absent or non-truthy → empty.
    pub fn list(&self, key: &str) -> Vec<String> {
        match self.0.get(key) {
            Some(Value::List(items)) => items.clone(),
            Some(v) if v.is_truthy() => vec![v.display_string()],
            _ => Vec::new(),
        }
    }
}

/// Result of splitting a content file into metadata and body.
#[derive(Debug, Clone)]
pub struct Document {
    pub metadata: Metadata,
    /// Body text. Trimmed when a front-matter block was found; the
    /// unmodified input otherwise.
    pub body: String,
    /// Whether a well-formed `---`/`---` block was present. `false` means
    /// every metadata lookup will hit its default.
    pub has_front_matter: bool,
}

/// How many leading lines may precede the opening `---`.
const OPENING_SEARCH_WINDOW: usize = 3;

/// Split raw file text into `(metadata, body)`.
///
/// Line endings are normalized (`\r\n` and `\n` both accepted). The opening
/// delimiter must appear within the first three lines; the closing delimiter
/// anywhere after it. Malformed documents degrade to "no front matter" —
/// this function does not fail.
pub fn parse_document(text: &str) -> Document {
    let lines: Vec<&str> = text.lines().collect();

    let opening = lines
        .iter()
        .take(OPENING_SEARCH_WINDOW)
        .position(|line| line.trim() == "---");

    let Some(start) = opening else {
        return Document {
            metadata: Metadata::default(),
            body: text.to_string(),
            has_front_matter: false,
        };
    };

    let closing = lines
        .iter()
        .skip(start + 1)
        .position(|line| line.trim() == "---")
        .map(|offset| start + 1 + offset);

    let Some(end) = closing else {
        // Opening delimiter with no closing one: not a front-matter block.
        return Document {
            metadata: Metadata::default(),
            body: text.to_string(),
            has_front_matter: false,
        };
    };

    let metadata = parse_block(&lines[start + 1..end]);
    let body = lines[end + 1..].join("\n").trim().to_string();

    Document {
        metadata,
        body,
        has_front_matter: true,
    }
}

/// Parse the lines strictly between the delimiters.
///
/// Blank lines and lines without a colon are skipped. The key is everything
/// before the first colon; later keys overwrite earlier duplicates.
fn parse_block(lines: &[&str]) -> Metadata {
    let mut map = BTreeMap::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        if let Some(colon) = line.find(':') {
            let key = line[..colon].trim().to_string();
            let raw = line[colon + 1..].trim();
            map.insert(key, coerce_value(raw));
        }
    }
    Metadata(map)
}

fn coerce_value(raw: &str) -> Value {
    if let Some(inner) = raw.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        return Value::List(split_list_items(inner));
    }
    if let Some(inner) = raw.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
        return Value::Str(inner.to_string());
    }
    if let Some(inner) = raw.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')) {
        return Value::Str(inner.to_string());
    }
    if raw == "true" || raw == "false" {
        return Value::Bool(raw == "true");
    }
    if !raw.is_empty()
        && let Ok(n) = raw.parse::<f64>()
        && n.is_finite()
    {
        return Value::Number(n);
    }
    Value::Str(raw.to_string())
}

/// Split the inside of a bracketed list on commas outside quotes.
///
/// A comma inside a single- or double-quoted span does not split. Each item
/// is trimmed, stripped of one leading and one trailing quote character,
/// and dropped if empty.
fn split_list_items(inner: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut in_single = false;
    let mut in_double = false;

    for c in inner.chars() {
        match c {
            '\'' if !in_double => {
                in_single = !in_single;
                current.push(c);
            }
            '"' if !in_single => {
                in_double = !in_double;
                current.push(c);
            }
            ',' if !in_single && !in_double => {
                items.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    items.push(current);

    items
        .iter()
        .map(|item| unquote_item(item.trim()).to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Strip at most one leading and one trailing quote character (either kind,
/// independently). `"b, c"` → `b, c`; `'half` → `half`.
fn unquote_item(item: &str) -> &str {
    let item = item
        .strip_prefix('"')
        .or_else(|| item.strip_prefix('\''))
        .unwrap_or(item);
    item.strip_suffix('"')
        .or_else(|| item.strip_suffix('\''))
        .unwrap_or(item)
}
