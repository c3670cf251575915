use crate::common::error::Result;
use async_trait::async_trait;

/// Outbound HTTP seam shared by the catalog, name table and image probes.
#[async_trait]
pub trait HttpClientPort: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpGetResult>;
}

#[derive(Clone, Debug)]
pub struct HttpGetResult {
    pub status: u16,
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl HttpGetResult {
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

/// Result of checking one identifier against the image host
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The host answered 2xx
    Exists,
    /// The host answered with any other status
    Missing { status: u16 },
    /// No response at all (DNS, connect, timeout, ...)
    Unreachable { error: String },
}

impl ProbeOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ProbeOutcome::Exists)
    }
}

/// Existence check for a single image identifier.
///
/// Implementations are invoked concurrently and must not share mutable state.
#[async_trait]
pub trait IdentifierValidator: Send + Sync {
    async fn probe(&self, twitter_id: &str) -> ProbeOutcome;

    async fn is_valid(&self, twitter_id: &str) -> bool {
        self.probe(twitter_id).await.is_valid()
    }
}
