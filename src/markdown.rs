//! Key/value extraction from semi-structured settings text.
//!
//! Reports carry some settings as freeform markdown such as
//!
//! ```text
//! ## Graphics
//! - **FSR**: On
//! - Sharpness: 80
//!
//! | Setting | Value |
//! |---------|-------|
//! | Shadows | Low   |
//! ```
//!
//! which is flattened into ordered [`ParsedEntry`] values. Lines that do not
//! look like a key/value pair are ignored.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParsedEntry {
    /// Normalized key used as row identity.
    pub key: String,
    /// Key as written, for display.
    pub raw_key: String,
    pub value: String,
}

pub fn parse_key_values(text: Option<&str>) -> Vec<ParsedEntry> {
    let Some(text) = text else {
        return Vec::new();
    };
    let lines: Vec<&str> = text.lines().map(str::trim).collect();

    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<ParsedEntry> = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        let pair = if line.starts_with('|') {
            let next_is_delimiter = lines
                .get(idx + 1)
                .is_some_and(|next| is_table_delimiter(next));
            if next_is_delimiter {
                // table header
                continue;
            }
            parse_table_row(line)
        } else {
            parse_pair_line(line)
        };
        let Some((raw_key, value)) = pair else {
            continue;
        };
        let key = normalize_key(&raw_key);
        if key.is_empty() {
            continue;
        }
        // A repeated key keeps its first position and fills in a value only
        // if the earlier occurrence had none.
        if let Some(&pos) = positions.get(&key) {
            if out[pos].value.is_empty() {
                out[pos].value = value;
            }
            continue;
        }
        positions.insert(key.clone(), out.len());
        out.push(ParsedEntry {
            key,
            raw_key,
            value,
        });
    }
    out
}

/// Trim, collapse inner whitespace and lowercase.
pub fn normalize_key(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn parse_pair_line(line: &str) -> Option<(String, String)> {
    if line.is_empty() || line.starts_with('#') || is_rule(line) {
        return None;
    }
    let body = strip_list_marker(strip_quote_marker(line));
    let (key, value) = body
        .split_once(':')
        .or_else(|| body.split_once('='))?;
    let key = strip_emphasis(key);
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), strip_emphasis(value).to_string()))
}

fn parse_table_row(line: &str) -> Option<(String, String)> {
    if is_table_delimiter(line) {
        return None;
    }
    let cells: Vec<&str> = line
        .trim_matches('|')
        .split('|')
        .map(str::trim)
        .collect();
    let (key, rest) = cells.split_first()?;
    if rest.is_empty() {
        return None;
    }
    let key = strip_emphasis(key);
    if key.is_empty() {
        return None;
    }
    let value = rest
        .iter()
        .map(|cell| strip_emphasis(cell))
        .filter(|cell| !cell.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    Some((key.to_string(), value))
}

fn is_table_delimiter(line: &str) -> bool {
    line.starts_with('|')
        && line.contains('-')
        && line
            .chars()
            .all(|c| matches!(c, '|' | '-' | ':' | ' ' | '\t'))
}

fn is_rule(line: &str) -> bool {
    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    compact.len() >= 3
        && ['-', '*', '_']
            .iter()
            .any(|marker| compact.chars().all(|c| c == *marker))
}

fn strip_quote_marker(line: &str) -> &str {
    let mut rest = line;
    while let Some(stripped) = rest.strip_prefix('>') {
        rest = stripped.trim_start();
    }
    rest
}

fn strip_list_marker(line: &str) -> &str {
    for marker in ["- ", "* ", "+ "] {
        if let Some(stripped) = line.strip_prefix(marker) {
            return stripped.trim_start();
        }
    }
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        let rest = &line[digits..];
        for marker in [". ", ") "] {
            if let Some(stripped) = rest.strip_prefix(marker) {
                return stripped.trim_start();
            }
        }
    }
    line
}

fn strip_emphasis(text: &str) -> &str {
    text.trim()
        .trim_matches(|c: char| matches!(c, '*' | '_' | '`'))
        .trim()
}
