//! Syndication document parsing.
//!
//! Both Letterboxd and Goodreads publish RSS 2.0; Atom is accepted as a fallback
//! so a feed that switches format keeps working.

use super::types::FeedItem;
use anyhow::Result;

/// Parse raw feed bytes into items, trying RSS first, then Atom.
/// Public for unit testing with fixtures.
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<FeedItem>> {
    if let Ok(channel) = rss::Channel::read_from(bytes) {
        return Ok(channel.items().iter().map(rss_item).collect());
    }

    if let Ok(feed) = atom_syndication::Feed::read_from(bytes) {
        return Ok(feed.entries().iter().map(atom_entry).collect());
    }

    anyhow::bail!("document is neither RSS nor Atom ({} bytes)", bytes.len())
}

fn rss_item(item: &rss::Item) -> FeedItem {
    // <dc:date> stands in for an "updated" stamp when <pubDate> is absent
    let updated = item
        .dublin_core_ext()
        .and_then(|dc| dc.dates().first())
        .cloned();

    FeedItem {
        id: item.guid().map(|g| g.value().to_string()),
        link: item.link().map(str::to_string),
        title: item.title().map(str::to_string),
        summary: item.description().map(str::to_string),
        published: item.pub_date().map(str::to_string),
        updated,
    }
}

fn atom_entry(entry: &atom_syndication::Entry) -> FeedItem {
    let summary = entry
        .summary()
        .map(|s| s.as_str().to_string())
        .or_else(|| entry.content().and_then(|c| c.value()).map(str::to_string));

    FeedItem {
        id: Some(entry.id().to_string()),
        link: entry.links().first().map(|l| l.href().to_string()),
        title: Some(entry.title().as_str().to_string()),
        summary,
        published: entry.published().map(|d| d.to_rfc3339()),
        updated: Some(entry.updated().to_rfc3339()),
    }
}
