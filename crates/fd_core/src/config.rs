use serde::{Deserialize, Serialize};

/// Mutable user settings for the daily digest.
///
/// `hour` is the local send hour (0-23); `number_of_articles` bounds how many
/// headlines are scraped and mailed. Field names on the wire match the
/// control API (`hour`, `numberOfArticles`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    pub hour: u32,
    #[serde(rename = "numberOfArticles")]
    pub number_of_articles: usize,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            hour: 8,
            number_of_articles: 5,
        }
    }
}

/// Partial update submitted through `POST /config`.
///
/// Fields are validated independently; a missing or out-of-range field leaves
/// the current value untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigUpdate {
    pub hour: Option<i64>,
    #[serde(rename = "numberOfArticles")]
    pub number_of_articles: Option<i64>,
}

impl UserConfig {
    /// Applies the valid fields of `update`, silently keeping the prior
    /// value for anything invalid.
    pub fn apply(&mut self, update: &ConfigUpdate) {
        if let Some(hour) = update.hour {
            if (0..=23).contains(&hour) {
                self.hour = hour as u32;
            }
        }
        if let Some(count) = update.number_of_articles {
            if count > 0 {
                self.number_of_articles = count as usize;
            }
        }
    }
}
