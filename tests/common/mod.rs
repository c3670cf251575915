#![allow(dead_code)]

use async_trait::async_trait;
use emoji_scraper::app::ports::{HttpClientPort, HttpGetResult};
use emoji_scraper::common::error::{Result, ScraperError};
use emoji_scraper::pipeline::PipelineConfig;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub const CATALOG_URL: &str = "http://stub.test/emoji4unicode/full.html";
pub const UNICODE_URL: &str = "http://stub.test/UnicodeData.txt";
pub const IMAGE_TEMPLATE: &str = "http://img.stub.test/72x72/{twitter_id}.png";

pub const CATALOG_HTML: &str = r#"<html><body><table>
<tr class="category"><th colspan="3">Nature</th></tr>
<tr id="e-000"><td>e-000</td><td>U+2600<br><img src="sun.gif"></td><td>BLACK SUN WITH RAYS<br>sunny</td></tr>
<tr id="e-001"><td>e-001</td><td>U+2601<br></td><td>CLOUD</td></tr>
<tr id="e-4ED"><td>e-4ED</td><td>U+1F1E8 U+1F1F3<br></td><td>REGIONAL INDICATOR SYMBOL LETTERS CN</td></tr>
<tr id="e-7D6"><td>e-7D6</td><td>U+1F3C0<br></td><td>BASKETBALL AND HOOP</td></tr>
<tr id="e-002"><td>e-002</td><td>U+2614<br></td><td>UMBRELLA WITH RAIN DROPS</td></tr>
<tr id="e-B00"><td>e-B00</td><td><br>-</td><td>NO UNICODE MAPPING</td></tr>
<tr id="e-003"><td>e-003</td><td>U+2600<br></td><td>SUN</td></tr>
</table></body></html>"#;

pub const UNICODE_DATA: &str = "\
2600;BLACK SUN WITH RAYS;So;0;ON;;;;;N;;;;;
2601;CLOUD;So;0;ON;;;;;N;;;;;
2614;UMBRELLA WITH RAIN DROPS;So;0;ON;;;;;N;;;;;
1F1E8;REGIONAL INDICATOR SYMBOL LETTER C;So;0;L;;;;;N;;;;;
1F1F3;REGIONAL INDICATOR SYMBOL LETTER N;So;0;L;;;;;N;;;;;
1F3C0;BASKETBALL AND HOOP;So;0;ON;;;;;N;;;;;
";

/// Serves canned responses by URL; anything unrouted fails like a refused connection
#[derive(Default)]
pub struct StubHttp {
    routes: HashMap<String, HttpGetResult>,
    calls: Mutex<HashMap<String, usize>>,
    total_calls: AtomicUsize,
}

impl StubHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, url: &str, status: u16, body: &str) -> Self {
        self.routes.insert(
            url.to_string(),
            HttpGetResult {
                status,
                bytes: body.as_bytes().to_vec(),
                content_type: "text/plain".into(),
            },
        );
        self
    }

    pub fn image(self, twitter_id: &str, status: u16) -> Self {
        let url = IMAGE_TEMPLATE.replace("{twitter_id}", twitter_id);
        self.route(&url, status, "")
    }

    pub fn calls_to(&self, url: &str) -> usize {
        self.calls.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.total_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpClientPort for StubHttp {
    async fn get(&self, url: &str) -> Result<HttpGetResult> {
        self.total_calls.fetch_add(1, Ordering::SeqCst);
        *self.calls.lock().unwrap().entry(url.to_string()).or_default() += 1;
        tokio::task::yield_now().await;
        self.routes.get(url).cloned().ok_or_else(|| {
            ScraperError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                format!("no route for {url}"),
            ))
        })
    }
}

/// Catalog, name table and images for the fixture above. 1f3c0 is missing
/// on the image host and 2614 is unreachable.
pub fn fixture_http(unicode_data: &str) -> StubHttp {
    StubHttp::new()
        .route(CATALOG_URL, 200, CATALOG_HTML)
        .route(UNICODE_URL, 200, unicode_data)
        .image("2600", 200)
        .image("2601", 200)
        .image("1f1e8-1f1f3", 200)
        .image("1f3c0", 404)
}

pub fn stub_config(concurrency: usize) -> PipelineConfig {
    PipelineConfig {
        emoji_data_url: CATALOG_URL.to_string(),
        unicode_data_url: UNICODE_URL.to_string(),
        image_url_template: IMAGE_TEMPLATE.to_string(),
        concurrency,
    }
}
