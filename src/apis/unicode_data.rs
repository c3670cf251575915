use crate::apis::fetch_source;
use crate::app::ports::HttpClientPort;
use crate::common::constants::UNICODE_DATA_SOURCE;
use crate::common::error::Result;
use crate::common::types::UnicodeNameTable;
use tracing::{info, instrument};

/// The Unicode Character Database's `UnicodeData.txt`
pub struct UnicodeDataSource {
    url: String,
}

impl UnicodeDataSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    #[instrument(skip(self, http), fields(url = %self.url))]
    pub async fn fetch(&self, http: &dyn HttpClientPort) -> Result<UnicodeNameTable> {
        let resp = fetch_source(http, UNICODE_DATA_SOURCE, &self.url).await?;
        let table = parse_unicode_data(&resp.text());
        info!("Parsed {} codepoint names", table.len());
        Ok(table)
    }
}

/// Build the codepoint -> name table from `UnicodeData.txt` content.
///
/// Field 0 (uppercased) is the key and field 1 the name. Lines with fewer
/// than two fields are skipped.
pub fn parse_unicode_data(text: &str) -> UnicodeNameTable {
    text.split('\n')
        .filter_map(|line| {
            let mut fields = line.split(';');
            let label = fields.next()?;
            let name = fields.next()?;
            Some((label.trim().to_uppercase(), name.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
0027;APOSTROPHE;Po;0;ON;;;;;N;APOSTROPHE-QUOTE;;;;
00ae;REGISTERED SIGN;So;0;ON;;;;;N;REGISTERED TRADE MARK SIGN;;;;
2600;BLACK SUN WITH RAYS;So;0;ON;;;;;N;;;;;
garbage line without separators

1F3C0;BASKETBALL AND HOOP;So;0;ON;;;;;N;;;;;
";

    #[test]
    fn test_parse_unicode_data() {
        let table = parse_unicode_data(SAMPLE);
        assert_eq!(table.len(), 4);
        assert_eq!(table.get("0027"), Some("APOSTROPHE"));
        assert_eq!(table.get("1F3C0"), Some("BASKETBALL AND HOOP"));
    }

    #[test]
    fn test_parse_unicode_data_uppercases_labels() {
        let table = parse_unicode_data(SAMPLE);
        assert_eq!(table.get("00AE"), Some("REGISTERED SIGN"));
        assert_eq!(table.get("00ae"), None);
    }

    #[test]
    fn test_parse_unicode_data_skips_short_lines() {
        let table = parse_unicode_data("no-fields\n\n;\n");
        // ";" has two (empty) fields and is kept, like any other two-field line
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(""), Some(""));
    }
}
