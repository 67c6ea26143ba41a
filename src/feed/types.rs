use serde::{Deserialize, Deserializer, Serialize};

/// Canonical, source-agnostic record. One JSON line per entry in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub link: String,
    #[serde(default)]
    pub rating_stars: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub review_html: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub date_utc: String,
}

/// Hand-edited or older lines may carry `null` where a string is expected.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// The two feeds this crate knows how to ingest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Films,
    Books,
}

impl Source {
    /// Prefix of every entry id from this source.
    pub fn id_prefix(self) -> &'static str {
        match self {
            Source::Films => "letterboxd",
            Source::Books => "goodreads",
        }
    }

    pub fn log_file(self) -> &'static str {
        match self {
            Source::Films => "films.jsonl",
            Source::Books => "books.jsonl",
        }
    }

    pub fn page_file(self) -> &'static str {
        match self {
            Source::Films => "films.html",
            Source::Books => "books.html",
        }
    }

    pub fn page_title(self) -> &'static str {
        match self {
            Source::Films => "Films",
            Source::Books => "Books",
        }
    }
}

/// One item as it appears in a syndication document, before any normalization.
/// Every field is whatever the document carried, untrimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedItem {
    pub id: Option<String>,
    pub link: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub published: Option<String>,
    pub updated: Option<String>,
}

/// Item from the Letterboxd diary feed. Ratings live in the title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilmFeedEntry(pub FeedItem);

/// Item from the Goodreads "read" shelf feed. Ratings live in the summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFeedEntry(pub FeedItem);

impl From<FeedItem> for FilmFeedEntry {
    fn from(item: FeedItem) -> Self {
        Self(item)
    }
}

impl From<FeedItem> for BookFeedEntry {
    fn from(item: FeedItem) -> Self {
        Self(item)
    }
}
