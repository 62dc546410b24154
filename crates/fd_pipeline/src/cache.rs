use std::future::Future;

use chrono::NaiveDate;
use tracing::info;

use fd_core::Headline;

/// The day-scoped scrape result. At most one entry exists at a time; a date
/// roll-over replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub date: NaiveDate,
    pub headlines: Vec<Headline>,
}

/// Keeps the last scrape keyed by calendar date so repeat runs within one
/// day skip the network round trip.
#[derive(Debug, Default)]
pub struct DailyCache {
    entry: Option<CacheEntry>,
}

impl DailyCache {
    pub fn new() -> Self {
        Self { entry: None }
    }

    /// Returns the headlines for `today`, refreshing through `refresh` when
    /// the stored entry is missing or from another day. The refreshed list
    /// is stored even when empty, so a failed scrape is not retried until
    /// the date changes.
    pub async fn get_or_refresh<F, Fut>(&mut self, today: NaiveDate, refresh: F) -> Vec<Headline>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Vec<Headline>>,
    {
        if let Some(entry) = &self.entry {
            if entry.date == today {
                info!("using cached headlines for {}", today);
                return entry.headlines.clone();
            }
        }

        let headlines = refresh().await;
        self.entry = Some(CacheEntry {
            date: today,
            headlines: headlines.clone(),
        });
        headlines
    }

    pub fn entry(&self) -> Option<&CacheEntry> {
        self.entry.as_ref()
    }
}
