use async_trait::async_trait;
use fd_core::{Headline, Result};

pub mod brazil;

pub use brazil::folha::FolhaScraper;

/// A front-page scraper for a single news source.
#[async_trait]
pub trait FrontPageScraper: Send + Sync {
    /// Returns the name of the news source
    fn source(&self) -> &str;

    /// Fetches the front page and returns at most `limit` headline/link
    /// pairs, preserving document order.
    async fn front_page(&self, limit: usize) -> Result<Vec<Headline>>;
}

/// Common utilities for scrapers
pub(crate) mod utils {
    use fd_core::{Error, Result};
    use url::Url;

    pub fn parse_url(url: &str) -> Result<Url> {
        Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))
    }

    /// Resolves an href against the page base. Absolute hrefs pass through
    /// unchanged; anything the base cannot absorb is dropped.
    pub fn resolve_href(base: &Url, href: &str) -> Option<String> {
        base.join(href).ok().map(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::utils;
    use url::Url;

    #[test]
    fn test_parse_url() {
        assert!(utils::parse_url("https://example.com").is_ok());
        assert!(utils::parse_url("invalid-url").is_err());
    }

    #[test]
    fn test_resolve_href() {
        let base = Url::parse("https://www.folha.uol.com.br/").unwrap();
        assert_eq!(
            utils::resolve_href(&base, "/poder/2024/noticia.shtml").unwrap(),
            "https://www.folha.uol.com.br/poder/2024/noticia.shtml"
        );
        assert_eq!(
            utils::resolve_href(&base, "https://www1.folha.uol.com.br/esporte/a.shtml").unwrap(),
            "https://www1.folha.uol.com.br/esporte/a.shtml"
        );
    }
}
