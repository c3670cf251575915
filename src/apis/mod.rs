pub mod emoji4unicode;
pub mod twemoji;
pub mod unicode_data;

use crate::app::ports::{HttpClientPort, HttpGetResult};
use crate::common::error::{Result, ScraperError};
use crate::observability::metrics::sources;
use tracing::{debug, instrument};

/// Fetch a whole source document. Transport errors and non-2xx answers are
/// both errors; there is no partial result.
#[instrument(skip(http))]
pub async fn fetch_source(
    http: &dyn HttpClientPort,
    source: &'static str,
    url: &str,
) -> Result<HttpGetResult> {
    let resp = match http.get(url).await {
        Ok(resp) => resp,
        Err(e) => {
            sources::fetch_error(source);
            return Err(e);
        }
    };

    if !resp.is_success() {
        sources::fetch_error(source);
        return Err(ScraperError::Status {
            url: url.to_string(),
            status: resp.status,
        });
    }

    sources::fetch_success(source);
    sources::payload_bytes(source, resp.bytes.len());
    debug!(
        "Fetched {} bytes ({}) from {}",
        resp.bytes.len(),
        resp.content_type,
        url
    );
    Ok(resp)
}
