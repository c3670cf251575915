//! Conversions from codepoint label sequences (`U+1F1EC U+1F1E7`) into
//! image identifiers and into the characters they denote.

use crate::common::constants::CODEPOINT_MARKER;
use crate::common::error::{Result, ScraperError};
use crate::common::types::UnicodeNameTable;

/// Split a label sequence into the hex bodies of its tokens.
///
/// Every token must carry the `U+` marker followed by one or more hex digits.
fn label_bodies(codepoint: &str) -> Result<Vec<&str>> {
    let malformed = |reason: String| ScraperError::MalformedCodepoint {
        codepoint: codepoint.to_string(),
        reason,
    };

    let tokens: Vec<&str> = codepoint.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(malformed("no codepoint labels".into()));
    }

    tokens
        .into_iter()
        .map(|token| {
            let body = token
                .strip_prefix(CODEPOINT_MARKER)
                .ok_or_else(|| malformed(format!("token '{token}' lacks the {CODEPOINT_MARKER} marker")))?;
            if body.is_empty() || !body.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(malformed(format!("token '{token}' is not a hex codepoint")));
            }
            Ok(body)
        })
        .collect()
}

/// Turn a codepoint label sequence into the id used by Twitter's emoji image urls.
///
/// `U+00AE` => `ae`, `U+1F1EC U+1F1E7` => `1f1ec-1f1e7`
pub fn format_identifier(codepoint: &str) -> Result<String> {
    let parts: Vec<String> = label_bodies(codepoint)?
        .into_iter()
        .map(|body| {
            let trimmed = body.trim_start_matches('0');
            if trimmed.is_empty() {
                "0".to_string()
            } else {
                trimmed.to_ascii_lowercase()
            }
        })
        .collect();
    Ok(parts.join("-"))
}

/// Decode a label sequence into the character sequence it denotes.
///
/// Each label is looked up in `names`; a label missing from the table is an
/// `UnknownCodepoint` error. The canonical name is then resolved through the
/// bundled Unicode name database, falling back to the label's scalar value
/// when the database predates the name.
pub fn encode_codepoints(codepoint: &str, names: &UnicodeNameTable) -> Result<String> {
    let mut encoded = String::new();
    for body in label_bodies(codepoint)? {
        let label = body.to_ascii_uppercase();
        let name = names
            .get(&label)
            .ok_or_else(|| ScraperError::UnknownCodepoint(label.clone()))?;

        let ch = unicode_names2::character(name)
            .or_else(|| u32::from_str_radix(&label, 16).ok().and_then(char::from_u32))
            .ok_or_else(|| ScraperError::UnknownName(name.to_string()))?;
        encoded.push(ch);
    }
    Ok(encoded)
}
