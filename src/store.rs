//! Append-only JSON-lines log of every entry ever ingested from one source.
//!
//! The log is the only record of what has been seen. Lines are never rewritten;
//! a line that fails to parse is skipped on read rather than failing the run.

use crate::feed::types::Entry;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct EntryLog {
    path: PathBuf,
}

/// Id-only view of a record; anything else on the line is ignored.
#[derive(Deserialize)]
struct IdRecord {
    id: String,
}

impl EntryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every id already in the log. A missing file is an empty log.
    pub fn load_ids(&self) -> Result<HashSet<String>> {
        Ok(self
            .read_records::<IdRecord>()?
            .into_iter()
            .map(|r| r.id)
            .collect())
    }

    /// Append one line per entry. No-op for an empty slice.
    pub fn append(&self, entries: &[Entry]) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open log for append: {}", self.path.display()))?;
        let mut writer = BufWriter::new(file);

        for entry in entries {
            let line = serde_json::to_string(entry)
                .with_context(|| format!("Failed to serialize entry {}", entry.id))?;
            writeln!(writer, "{}", line)
                .with_context(|| format!("Failed to write log: {}", self.path.display()))?;
        }
        writer
            .flush()
            .with_context(|| format!("Failed to flush log: {}", self.path.display()))?;
        Ok(())
    }

    /// All entries, newest `date_utc` first. Equal dates keep file order.
    pub fn load_all(&self) -> Result<Vec<Entry>> {
        let mut entries: Vec<Entry> = self.read_records()?;
        entries.sort_by(|a, b| b.date_utc.cmp(&a.date_utc));
        Ok(entries)
    }

    fn read_records<T: for<'de> Deserialize<'de>>(&self) -> Result<Vec<T>> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to open log: {}", self.path.display()))
            }
        };

        let mut records = Vec::new();
        // raw bytes: a torn multi-byte glyph is a malformed line, not a read error
        for (n, line) in BufReader::new(file).split(b'\n').enumerate() {
            let line = line
                .with_context(|| format!("Failed to read log: {}", self.path.display()))?;
            match serde_json::from_slice::<T>(&line) {
                Ok(record) => records.push(record),
                Err(e) => debug!(path = %self.path.display(), line = n + 1, error = %e, "skipping malformed log line"),
            }
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, date: &str) -> Entry {
        Entry {
            id: id.to_string(),
            title: format!("title {}", id),
            link: String::new(),
            rating_stars: None,
            review_html: String::new(),
            date_utc: date.to_string(),
        }
    }

    fn log_in(dir: &tempfile::TempDir) -> EntryLog {
        EntryLog::new(dir.path().join("films.jsonl"))
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = log_in(&dir);
        assert!(log.load_ids().unwrap().is_empty());
        assert!(log.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_append_empty_does_not_create_file() {
        let dir = tempfile::tempdir().unwrap();
        let log = log_in(&dir);
        log.append(&[]).unwrap();
        assert!(!log.path().exists());
    }

    #[test]
    fn test_round_trip_preserves_glyphs() {
        let dir = tempfile::tempdir().unwrap();
        let log = log_in(&dir);
        let original = Entry {
            id: "letterboxd:letterboxd-review-1".to_string(),
            title: "Amélie, 2001 - ★★★★½".to_string(),
            link: "https://letterboxd.com/x/film/amelie/".to_string(),
            rating_stars: Some("★★★★☆".to_string()),
            review_html: "<p>Très “charmant”</p>".to_string(),
            date_utc: "2024-01-05T20:15:00+00:00".to_string(),
        };
        log.append(std::slice::from_ref(&original)).unwrap();

        let raw = std::fs::read_to_string(log.path()).unwrap();
        assert!(raw.contains("★★★★☆"), "glyphs must not be escaped: {}", raw);
        assert!(raw.ends_with('\n'));

        assert_eq!(log.load_all().unwrap(), vec![original]);
    }

    #[test]
    fn test_load_all_sorts_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let log = log_in(&dir);
        log.append(&[
            entry("a", "2024-01-01T00:00:00+00:00"),
            entry("b", "2024-06-01T00:00:00+00:00"),
        ])
        .unwrap();
        log.append(&[entry("c", "2023-12-31T00:00:00+00:00")]).unwrap();

        let dates: Vec<_> = log
            .load_all()
            .unwrap()
            .into_iter()
            .map(|e| e.date_utc[..10].to_string())
            .collect();
        assert_eq!(dates, vec!["2024-06-01", "2024-01-01", "2023-12-31"]);
    }

    #[test]
    fn test_missing_date_sorts_last_and_ties_keep_order() {
        let dir = tempfile::tempdir().unwrap();
        let log = log_in(&dir);
        std::fs::write(
            log.path(),
            concat!(
                "{\"id\":\"nodate\"}\n",
                "{\"id\":\"t1\",\"date_utc\":\"2024-01-01T00:00:00+00:00\"}\n",
                "{\"id\":\"t2\",\"date_utc\":\"2024-01-01T00:00:00+00:00\"}\n",
            ),
        )
        .unwrap();

        let ids: Vec<_> = log.load_all().unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["t1", "t2", "nodate"]);
    }

    #[test]
    fn test_invalid_utf8_line_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let log = log_in(&dir);
        log.append(&[entry("good", "2024-01-01T00:00:00+00:00")]).unwrap();

        let mut raw = std::fs::read(log.path()).unwrap();
        // write torn mid-glyph: first two bytes of '★'
        raw.extend_from_slice(b"{\"id\":\"torn\",\"title\":\"\xe2\x98\n");
        std::fs::write(log.path(), raw).unwrap();
        log.append(&[entry("later", "2024-02-01T00:00:00+00:00")]).unwrap();

        let ids = log.load_ids().unwrap();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains("good") && ids.contains("later"));

        let all: Vec<_> = log.load_all().unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(all, vec!["later", "good"]);
    }

    #[test]
    fn test_null_fields_load_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = log_in(&dir);
        std::fs::write(
            log.path(),
            "{\"id\":\"x\",\"title\":null,\"link\":null,\"rating_stars\":null,\"review_html\":null,\"date_utc\":null}\n",
        )
        .unwrap();

        assert!(log.load_ids().unwrap().contains("x"));
        let all = log.load_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "");
        assert_eq!(all[0].link, "");
        assert_eq!(all[0].review_html, "");
        assert_eq!(all[0].date_utc, "");
        assert_eq!(all[0].rating_stars, None);
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let log = log_in(&dir);
        log.append(&[entry("good", "2024-01-01T00:00:00+00:00")]).unwrap();
        let mut raw = std::fs::read_to_string(log.path()).unwrap();
        raw.push_str("{not json\n\n42\n{\"title\":\"no id\"}\n");
        std::fs::write(log.path(), raw).unwrap();

        let ids = log.load_ids().unwrap();
        assert_eq!(ids.len(), 1);
        assert!(ids.contains("good"));

        // a record without an id still renders; only id loading needs the field
        let all = log.load_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, "good");
    }
}
