//! One sync cycle: fetch → normalize → filter new → append → reload → render.
//!
//! Sources are processed one after another, films first. Any error aborts the
//! cycle; entries appended before the failure stay in the log.

use crate::config::Config;
use crate::engine::normalize::{normalize_all, SourceEntry};
use crate::feed::types::{BookFeedEntry, Entry, FeedItem, FilmFeedEntry, Source};
use crate::feed::FeedSource;
use crate::render::{render_page, PageMeta};
use crate::store::EntryLog;
use anyhow::{Context, Result};
use chrono::Utc;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::info;

/// Outcome of syncing one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    pub source: Source,
    pub fetched: usize,
    pub appended: usize,
    pub total: usize,
    pub page: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub films: SourceReport,
    pub books: SourceReport,
}

pub struct SyncDriver<F: FeedSource> {
    config: Config,
    feeds: F,
}

impl<F: FeedSource> SyncDriver<F> {
    pub fn new(config: Config, feeds: F) -> Self {
        Self { config, feeds }
    }

    pub fn log_for(&self, source: Source) -> EntryLog {
        EntryLog::new(self.config.paths.data_dir.join(source.log_file()))
    }

    pub fn page_for(&self, source: Source) -> PathBuf {
        self.config.paths.site_dir.join(source.page_file())
    }

    /// Run a full cycle over both sources.
    pub async fn run(&self) -> Result<SyncReport> {
        self.ensure_dirs()?;
        let generated = Utc::now().format("%Y-%m-%d %H:%M UTC").to_string();

        let films = self
            .sync_source::<FilmFeedEntry>(&self.config.feeds.film_feed_url, &generated)
            .await?;
        let books = self
            .sync_source::<BookFeedEntry>(&self.config.feeds.book_feed_url, &generated)
            .await?;

        Ok(SyncReport { films, books })
    }

    fn ensure_dirs(&self) -> Result<()> {
        for dir in [&self.config.paths.data_dir, &self.config.paths.site_dir] {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
        Ok(())
    }

    async fn sync_source<E>(&self, url: &str, generated: &str) -> Result<SourceReport>
    where
        E: SourceEntry + From<FeedItem>,
    {
        let source = E::SOURCE;
        let items = self.feeds.fetch_items(url).await
            .with_context(|| format!("Failed to fetch {} feed", source.page_title()))?;
        let fetched = items.len();

        let entries: Vec<E> = items.into_iter().map(E::from).collect();
        let normalized = normalize_all(&entries);

        let log = self.log_for(source);
        let seen = log.load_ids()?;
        let fresh = filter_new(normalized, &seen);
        log.append(&fresh)?;

        let all = log.load_all()?;
        let page_path = self.page_for(source);
        let page = PageMeta::for_source(source, &self.config.site.library_name);
        let html = render_page(&page, &all, generated);
        std::fs::write(&page_path, html)
            .with_context(|| format!("Failed to write page: {}", page_path.display()))?;

        info!(
            source = source.page_title(),
            fetched,
            appended = fresh.len(),
            total = all.len(),
            page = %page_path.display(),
            "source synced"
        );

        Ok(SourceReport {
            source,
            fetched,
            appended: fresh.len(),
            total: all.len(),
            page: page_path,
        })
    }
}

/// Entries whose id is not yet in `seen`, in feed order.
///
/// Duplicate ids within one fetch collapse to the first occurrence so a
/// single cycle never writes the same id twice.
pub fn filter_new(entries: Vec<Entry>, seen: &HashSet<String>) -> Vec<Entry> {
    let mut taken = HashSet::new();
    entries
        .into_iter()
        .filter(|e| !seen.contains(&e.id) && taken.insert(e.id.clone()))
        .collect()
}
