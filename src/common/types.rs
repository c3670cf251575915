use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

/// One row of the emoji4unicode catalog.
///
/// Field names on the wire match the published emoji table
/// (`emoji-id`, `codepoint`, `twitter-id`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawEmojiRecord {
    #[serde(rename = "emoji-id")]
    pub emoji_id: String,
    pub name: String,
    /// Space separated codepoint labels, e.g. `U+1F1EC U+1F1E7`
    pub codepoint: String,
    /// Image identifier derived from `codepoint`; set once before validation
    #[serde(rename = "twitter-id", skip_serializing_if = "Option::is_none")]
    pub twitter_id: Option<String>,
}

impl RawEmojiRecord {
    pub fn new(
        emoji_id: impl Into<String>,
        name: impl Into<String>,
        codepoint: impl Into<String>,
    ) -> Self {
        Self {
            emoji_id: emoji_id.into(),
            name: name.into(),
            codepoint: codepoint.into(),
            twitter_id: None,
        }
    }
}

/// Maps an uppercase hex codepoint label (`"0027"`) to its canonical
/// Unicode name (`"APOSTROPHE"`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnicodeNameTable(HashMap<String, String>);

impl UnicodeNameTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: impl Into<String>, name: impl Into<String>) {
        self.0.insert(label.into(), name.into());
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.0.get(label).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for UnicodeNameTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Identifiers that failed the image host probe
pub type ValidationOutcomeSet = HashSet<String>;

/// Final emoji dictionary keyed by the decoded character sequence.
/// Ordered so identical inputs always serialize identically.
pub type EmojiTable = BTreeMap<String, RawEmojiRecord>;
