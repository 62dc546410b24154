use std::sync::Arc;

use chrono::Local;
use tokio::sync::{Mutex, RwLock};
use tracing::{error, info};

use fd_core::UserConfig;
use fd_scrapers::FrontPageScraper;

use crate::cache::DailyCache;
use crate::mailer::Notifier;

/// Terminal result of one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Headlines were available and a notification was attempted.
    Delivered,
    /// Scrape and cache produced nothing; no notification was attempted.
    NoData,
}

/// Orchestrates cache lookup, scrape-on-miss and notification. Both the
/// manual trigger and the scheduler go through [`Pipeline::run`].
pub struct Pipeline {
    scraper: Arc<dyn FrontPageScraper>,
    notifier: Arc<dyn Notifier>,
    config: Arc<RwLock<UserConfig>>,
    cache: Mutex<DailyCache>,
}

impl Pipeline {
    pub fn new(
        scraper: Arc<dyn FrontPageScraper>,
        notifier: Arc<dyn Notifier>,
        config: Arc<RwLock<UserConfig>>,
    ) -> Self {
        Self {
            scraper,
            notifier,
            config,
            cache: Mutex::new(DailyCache::new()),
        }
    }

    /// Runs one scrape-cache-notify cycle. Runs serialize on the cache lock,
    /// so concurrent triggers produce at most one scrape and observe the
    /// same stored entry.
    pub async fn run(&self) -> RunOutcome {
        let today = Local::now().date_naive();
        let limit = self.config.read().await.number_of_articles;
        let scraper = Arc::clone(&self.scraper);

        let headlines = {
            let mut cache = self.cache.lock().await;
            cache
                .get_or_refresh(today, move || async move {
                    match scraper.front_page(limit).await {
                        Ok(headlines) => headlines,
                        Err(err) => {
                            error!("scrape failed: {}", err);
                            Vec::new()
                        }
                    }
                })
                .await
        };

        if headlines.is_empty() {
            error!("no headlines available for {}", today);
            return RunOutcome::NoData;
        }

        info!("dispatching digest with {} headlines", headlines.len());
        if let Err(err) = self.notifier.notify(&headlines).await {
            // best effort: the outcome stays Delivered, the failure is only
            // visible in the log stream
            error!("digest delivery failed: {}", err);
        }
        RunOutcome::Delivered
    }
}
