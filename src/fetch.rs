use async_trait::async_trait;

use crate::error::ScrapeError;

pub const DEFAULT_ROOT_URL: &str = "http://upcat.stickbread.net";

/// URL of a numbered results page. The site zero-pads page numbers to
/// three digits in its file names.
pub fn page_url(root_url: &str, page: u32) -> String {
    format!("{}/page-{:03}.html", root_url.trim_end_matches('/'), page)
}

/// URL of the root index page used for page-count discovery.
pub fn index_url(root_url: &str) -> String {
    format!("{}/", root_url.trim_end_matches('/'))
}

/// Retrieves raw markup for one page. The rest of the pipeline only
/// ever sees markup strings, so tests swap in an in-memory fetcher.
#[async_trait]
pub trait PageFetcher {
    async fn fetch_page(&self, page: u32) -> Result<String, ScrapeError>;
    async fn fetch_index(&self) -> Result<String, ScrapeError>;
}

pub struct HttpFetcher {
    client: reqwest::Client,
    root_url: String,
}

impl HttpFetcher {
    pub fn new(root_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            root_url: root_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get(&self, url: &str) -> Result<String, ScrapeError> {
        let transport = |source| ScrapeError::Transport {
            url: url.to_string(),
            source,
        };
        let response = self.client.get(url).send().await.map_err(transport)?;
        let response = response.error_for_status().map_err(transport)?;
        response.text().await.map_err(transport)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, page: u32) -> Result<String, ScrapeError> {
        self.get(&page_url(&self.root_url, page)).await
    }

    async fn fetch_index(&self) -> Result<String, ScrapeError> {
        self.get(&index_url(&self.root_url)).await
    }
}

// ── Tests ──
