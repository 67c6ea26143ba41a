//! Feed item → canonical [`Entry`].

use super::dates::resolve_date_utc;
use super::rating::{book_rating, film_rating, stars};
use crate::feed::types::{BookFeedEntry, Entry, FeedItem, FilmFeedEntry, Source};
use tracing::warn;

/// A per-source feed item that knows where its rating lives.
pub trait SourceEntry {
    const SOURCE: Source;

    fn item(&self) -> &FeedItem;

    /// Whole-star rating, if the item carries one.
    fn rating(&self) -> Option<u8>;
}

impl SourceEntry for FilmFeedEntry {
    const SOURCE: Source = Source::Films;

    fn item(&self) -> &FeedItem {
        &self.0
    }

    fn rating(&self) -> Option<u8> {
        film_rating(trimmed(&self.0.title))
    }
}

impl SourceEntry for BookFeedEntry {
    const SOURCE: Source = Source::Books;

    fn item(&self) -> &FeedItem {
        &self.0
    }

    fn rating(&self) -> Option<u8> {
        book_rating(trimmed(&self.0.summary))
    }
}

fn trimmed(field: &Option<String>) -> &str {
    field.as_deref().map(str::trim).unwrap_or_default()
}

/// `"<prefix>:<guid>"`, where guid is the native id or, failing that, the link.
pub fn entry_id(source: Source, item: &FeedItem) -> String {
    let native = trimmed(&item.id);
    let guid = if native.is_empty() { trimmed(&item.link) } else { native };
    format!("{}:{}", source.id_prefix(), guid)
}

pub fn normalize<E: SourceEntry>(entry: &E) -> Entry {
    let item = entry.item();
    let id = entry_id(E::SOURCE, item);
    // Every such item shares this id, so only the first one ever gets stored
    if trimmed(&item.id).is_empty() && trimmed(&item.link).is_empty() {
        warn!(%id, title = trimmed(&item.title), "feed item has neither guid nor link");
    }

    Entry {
        id,
        title: trimmed(&item.title).to_string(),
        link: trimmed(&item.link).to_string(),
        rating_stars: entry.rating().map(stars),
        review_html: trimmed(&item.summary).to_string(),
        date_utc: resolve_date_utc(item.published.as_deref(), item.updated.as_deref()),
    }
}

pub fn normalize_all<E: SourceEntry>(entries: &[E]) -> Vec<Entry> {
    entries.iter().map(normalize).collect()
}
