/// Source and naming constants shared across the crate

// Source names (used in logs and metrics labels)
pub const EMOJI4UNICODE_SOURCE: &str = "emoji4unicode";
pub const UNICODE_DATA_SOURCE: &str = "unicode_data";
pub const TWEMOJI_SOURCE: &str = "twemoji";

// Default endpoints
pub const UNICODE_DATA_URL: &str = "http://www.unicode.org/Public/UNIDATA/UnicodeData.txt";
pub const EMOJI_DATA_URL: &str = "http://www.unicode.org/~scherer/emoji4unicode/snapshot/full.html";
pub const TWITTER_URL_TEMPLATE: &str = "https://abs.twimg.com/emoji/v1/72x72/{twitter_id}.png";

/// Placeholder substituted with the formatted identifier in the image URL template
pub const TWITTER_ID_PLACEHOLDER: &str = "{twitter_id}";

/// Marker every codepoint label carries, e.g. `U+1F3C0`
pub const CODEPOINT_MARKER: &str = "U+";

// Validation defaults
pub const DEFAULT_CONCURRENCY: usize = 100;
/// Upper bound accepted for `validation.concurrency`
pub const MAX_CONCURRENCY: usize = 1024;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Config file picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "emoji_scraper.toml";

pub const USER_AGENT: &str = concat!("emoji_scraper/", env!("CARGO_PKG_VERSION"));
