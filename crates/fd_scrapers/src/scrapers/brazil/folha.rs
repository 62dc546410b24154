use std::time::Duration;

use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::info;

use fd_core::{Error, Headline, Result};

use crate::scrapers::{utils, FrontPageScraper};

/// Browser identity sent with the front-page request; the site rejects
/// unidentified clients.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Bound on the outbound fetch so a stuck request cannot hold the pipeline
/// gate indefinitely.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

pub struct FolhaScraper {
    client: reqwest::Client,
}

impl FolhaScraper {
    const BASE_URL: &'static str = "https://www.folha.uol.com.br/";
    const HEADLINE_SELECTOR: &'static str = "a.c-headline__url";

    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    async fn fetch_front_page(&self) -> Result<String> {
        let response = self
            .client
            .get(Self::BASE_URL)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }

    /// Extracts at most `limit` headline/link pairs from the front-page
    /// document, in document order. Relative hrefs are resolved against the
    /// site base; anchors without an href are skipped.
    fn parse_front_page(html: &str, limit: usize) -> Vec<Headline> {
        let document = Html::parse_document(html);
        let selector = Selector::parse(Self::HEADLINE_SELECTOR).unwrap();
        let base = utils::parse_url(Self::BASE_URL).unwrap();

        document
            .select(&selector)
            .filter_map(|element| {
                let title = element.text().collect::<String>().trim().to_string();
                let href = element.value().attr("href")?;
                let link = if href.starts_with("http") {
                    href.to_string()
                } else {
                    utils::resolve_href(&base, href)?
                };
                Some(Headline { title, link })
            })
            .take(limit)
            .collect()
    }
}

#[async_trait]
impl FrontPageScraper for FolhaScraper {
    fn source(&self) -> &str {
        "Folha de S.Paulo"
    }

    async fn front_page(&self, limit: usize) -> Result<Vec<Headline>> {
        info!("fetching front page from {}", Self::BASE_URL);
        let html = self.fetch_front_page().await?;

        let headlines = Self::parse_front_page(&html, limit);
        if headlines.is_empty() {
            return Err(Error::Scraping(
                "no headlines matched the front-page selector".to_string(),
            ));
        }

        info!("scraped {} headlines", headlines.len());
        Ok(headlines)
    }
}
