pub mod scrapers;

pub use scrapers::{FolhaScraper, FrontPageScraper};

pub mod prelude {
    pub use super::scrapers::FrontPageScraper;
    pub use fd_core::{Error, Headline, Result};
}
