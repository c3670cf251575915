use crate::app::ports::{HttpClientPort, IdentifierValidator, ProbeOutcome};
use crate::common::constants::TWITTER_ID_PLACEHOLDER;
use crate::observability::metrics::probes;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

/// Checks that an identifier has an image on Twitter's emoji host.
///
/// One GET per probe, no retries.
pub struct TwemojiValidator {
    http: Arc<dyn HttpClientPort>,
    url_template: String,
}

impl TwemojiValidator {
    pub fn new(http: Arc<dyn HttpClientPort>, url_template: impl Into<String>) -> Self {
        Self {
            http,
            url_template: url_template.into(),
        }
    }

    pub fn image_url(&self, twitter_id: &str) -> String {
        self.url_template.replace(TWITTER_ID_PLACEHOLDER, twitter_id)
    }
}

#[async_trait]
impl IdentifierValidator for TwemojiValidator {
    async fn probe(&self, twitter_id: &str) -> ProbeOutcome {
        let t0 = Instant::now();
        let outcome = match self.http.get(&self.image_url(twitter_id)).await {
            Ok(resp) if resp.is_success() => ProbeOutcome::Exists,
            Ok(resp) => ProbeOutcome::Missing { status: resp.status },
            Err(e) => ProbeOutcome::Unreachable { error: e.to_string() },
        };
        probes::record(&outcome, t0.elapsed().as_secs_f64());
        outcome
    }
}
