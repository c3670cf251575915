//! Builds the emoji table: fetch the catalog, derive image identifiers,
//! probe the image host, drop the failures, then decode the survivors
//! through the Unicode name table.

pub mod validate;

use crate::apis::emoji4unicode::EmojiCatalogSource;
use crate::apis::twemoji::TwemojiValidator;
use crate::apis::unicode_data::UnicodeDataSource;
use crate::app::ports::{HttpClientPort, IdentifierValidator};
use crate::codepoints::{encode_codepoints, format_identifier};
use crate::common::constants::{
    DEFAULT_CONCURRENCY, EMOJI_DATA_URL, TWITTER_URL_TEMPLATE, UNICODE_DATA_URL,
};
use crate::common::error::Result;
use crate::common::types::{EmojiTable, RawEmojiRecord, ValidationOutcomeSet};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument, Span};

pub use validate::validate_identifiers;

/// Everything a pipeline run needs to know; no ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub emoji_data_url: String,
    pub unicode_data_url: String,
    pub image_url_template: String,
    /// Maximum probes in flight. 1 probes sequentially.
    pub concurrency: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            emoji_data_url: EMOJI_DATA_URL.to_string(),
            unicode_data_url: UNICODE_DATA_URL.to_string(),
            image_url_template: TWITTER_URL_TEMPLATE.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub table: EmojiTable,
    pub total_records: usize,
    pub malformed_records: usize,
    pub invalid_identifiers: ValidationOutcomeSet,
    pub surviving_records: usize,
}

impl PipelineResult {
    /// Render the table as JSON, indented with two spaces unless `compact`
    pub fn to_json(&self, compact: bool) -> Result<String> {
        let json = if compact {
            serde_json::to_string(&self.table)?
        } else {
            serde_json::to_string_pretty(&self.table)?
        };
        Ok(json)
    }
}

pub struct Pipeline {
    config: PipelineConfig,
    http: Arc<dyn HttpClientPort>,
    validator: Arc<dyn IdentifierValidator>,
    span: Span,
}

fn separator() {
    info!("{}", "-".repeat(80));
}

impl Pipeline {
    pub fn new(config: PipelineConfig, http: Arc<dyn HttpClientPort>) -> Self {
        let validator = Arc::new(TwemojiValidator::new(
            http.clone(),
            config.image_url_template.clone(),
        ));
        Self {
            config,
            http,
            validator,
            span: info_span!("emoji_pipeline"),
        }
    }

    /// Replace the image host probe
    pub fn with_validator(mut self, validator: Arc<dyn IdentifierValidator>) -> Self {
        self.validator = validator;
        self
    }

    /// Log every stage under `span` instead of the default one
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Run all stages. Source fetch failures and codepoints missing from the
    /// name table abort the run; failed probes only shrink the result.
    pub async fn run(&self) -> Result<PipelineResult> {
        let span = self.span.clone();
        self.run_stages().instrument(span).await
    }

    async fn run_stages(&self) -> Result<PipelineResult> {
        info!("{:=^80}", " EMOJI DATA CREATOR ");
        info!("Getting and parsing emoji data");
        let raw = EmojiCatalogSource::new(&self.config.emoji_data_url)
            .fetch(self.http.as_ref())
            .await?;
        let total_records = raw.len();

        separator();
        info!("Creating twitter ids");
        let candidates = derive_identifiers(raw);
        let malformed_records = total_records - candidates.len();

        separator();
        info!(
            "Checking that twitter ids are valid (concurrency {})...",
            self.config.concurrency
        );
        let distinct: BTreeSet<String> = candidates
            .iter()
            .filter_map(|r| r.twitter_id.clone())
            .collect();
        let invalid_identifiers =
            validate_identifiers(self.validator.clone(), distinct, self.config.concurrency).await;

        separator();
        info!(
            "Removing {} bad twitter-ids from data",
            invalid_identifiers.len()
        );
        let survivors = filter_invalid(candidates, &invalid_identifiers);
        let surviving_records = survivors.len();

        separator();
        info!("Getting and parsing unicode data");
        let names = UnicodeDataSource::new(&self.config.unicode_data_url)
            .fetch(self.http.as_ref())
            .await?;

        separator();
        info!("Creating final emoji dict");
        let mut table = EmojiTable::new();
        for record in survivors {
            let key = encode_codepoints(&record.codepoint, &names)?;
            table.insert(key, record);
        }

        info!(
            total_records,
            malformed_records,
            invalid = invalid_identifiers.len(),
            surviving_records,
            entries = table.len(),
            "{:=^80}",
            " DONE "
        );

        Ok(PipelineResult {
            table,
            total_records,
            malformed_records,
            invalid_identifiers,
            surviving_records,
        })
    }
}

/// Attach the image identifier to every record; records whose codepoint
/// labels are malformed are dropped.
pub fn derive_identifiers(records: Vec<RawEmojiRecord>) -> Vec<RawEmojiRecord> {
    records
        .into_iter()
        .filter_map(|mut record| match format_identifier(&record.codepoint) {
            Ok(twitter_id) => {
                record.twitter_id = Some(twitter_id);
                Some(record)
            }
            Err(e) => {
                warn!("Dropping {}: {}", record.emoji_id, e);
                None
            }
        })
        .collect()
}

/// Keep the records whose identifier did not fail validation
pub fn filter_invalid(
    mut records: Vec<RawEmojiRecord>,
    invalid: &ValidationOutcomeSet,
) -> Vec<RawEmojiRecord> {
    records.retain(|r| match &r.twitter_id {
        Some(id) => !invalid.contains(id),
        None => false,
    });
    records
}
