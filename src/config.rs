use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub feeds: FeedsConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub site: SiteConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeedsConfig {
    #[serde(default = "default_film_feed_url")]
    pub film_feed_url: String,
    #[serde(default = "default_book_feed_url")]
    pub book_feed_url: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

fn default_film_feed_url() -> String {
    "https://letterboxd.com/Jurrasic_parker/rss/".to_string()
}

fn default_book_feed_url() -> String {
    "https://www.goodreads.com/review/list_rss/147391839?shelf=read".to_string()
}

fn default_request_timeout() -> u64 { 30_000 }

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            film_feed_url: default_film_feed_url(),
            book_feed_url: default_book_feed_url(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PathsConfig {
    /// Directory holding the per-source JSON-lines logs.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Directory the rendered pages are written to.
    #[serde(default = "default_site_dir")]
    pub site_dir: PathBuf,
}

fn default_data_dir() -> PathBuf { PathBuf::from("data") }
fn default_site_dir() -> PathBuf { PathBuf::from("site") }

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            site_dir: default_site_dir(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Appended to every page `<title>`, e.g. "Films • Nick’s Library".
    #[serde(default = "default_library_name")]
    pub library_name: String,
}

fn default_library_name() -> String {
    "Nick’s Library".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self { library_name: default_library_name() }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| "Failed to parse config TOML")?;
        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the built-in defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}
