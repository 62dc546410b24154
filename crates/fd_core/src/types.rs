use serde::{Deserialize, Serialize};

/// One headline/link pair extracted from the front page.
///
/// `link` is always an absolute URL; relative hrefs are resolved against the
/// source site's base before a `Headline` is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headline {
    pub title: String,
    pub link: String,
}
