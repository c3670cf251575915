use crate::apis::fetch_source;
use crate::app::ports::HttpClientPort;
use crate::common::constants::EMOJI4UNICODE_SOURCE;
use crate::common::error::{Result, ScraperError};
use crate::common::types::RawEmojiRecord;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::{debug, info, instrument};

// Only rows with an id and without a class carry emoji data; the rest are
// headers and category separators.
static ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr[id]:not([class])").expect("valid row selector"));
static CELL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td").expect("valid cell selector"));

/// The emoji4unicode snapshot table
pub struct EmojiCatalogSource {
    url: String,
}

impl EmojiCatalogSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    #[instrument(skip(self, http), fields(url = %self.url))]
    pub async fn fetch(&self, http: &dyn HttpClientPort) -> Result<Vec<RawEmojiRecord>> {
        let resp = fetch_source(http, EMOJI4UNICODE_SOURCE, &self.url).await?;
        let records = parse_catalog(&resp.text())?;
        info!("Successfully parsed {} emoji records", records.len());
        Ok(records)
    }
}

/// Text of `cell` ahead of its first `<br>`, trimmed
fn text_before_br(cell: &ElementRef<'_>) -> String {
    let mut text = String::new();
    for child in cell.children() {
        match child.value() {
            Node::Element(el) if el.name() == "br" => break,
            Node::Text(t) => text.push_str(t),
            Node::Element(_) => {
                if let Some(el) = ElementRef::wrap(child) {
                    text.extend(el.text());
                }
            }
            _ => {}
        }
    }
    text.trim().to_string()
}

/// First non-blank text node below `cell`, trimmed
fn first_text(cell: &ElementRef<'_>) -> String {
    cell.text()
        .map(str::trim)
        .find(|t| !t.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Extract the raw emoji records from the snapshot HTML.
///
/// The second cell of each row holds the codepoint labels ahead of its
/// `<br>`, the third cell the display name. A qualifying row with fewer
/// than three cells means the page layout changed and is an error.
pub fn parse_catalog(html: &str) -> Result<Vec<RawEmojiRecord>> {
    let document = Html::parse_document(html);

    let mut records = Vec::new();
    for row in document.select(&ROW_SELECTOR) {
        let emoji_id = row.value().attr("id").unwrap_or_default();
        let cells: Vec<ElementRef<'_>> = row.select(&CELL_SELECTOR).collect();
        if cells.len() < 3 {
            return Err(ScraperError::MissingField(format!(
                "row {emoji_id} has {} cells, expected at least 3",
                cells.len()
            )));
        }

        let codepoint = text_before_br(&cells[1]);
        let name = first_text(&cells[2]);
        debug!("{} {} {}", emoji_id, codepoint, name);
        records.push(RawEmojiRecord::new(emoji_id, name, codepoint));
    }
    Ok(records)
}
