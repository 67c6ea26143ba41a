use anyhow::Result;
use shelf_sync::config::Config;
use shelf_sync::feed::http::HttpFeedSource;
use shelf_sync::pipeline::SyncDriver;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("shelf_sync=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load_or_default(Path::new("config.toml"))?;
    let feeds = HttpFeedSource::new(config.feeds.request_timeout_ms)?;
    let driver = SyncDriver::new(config, feeds);

    let report = driver.run().await?;
    info!(
        new_films = report.films.appended,
        new_books = report.books.appended,
        "sync complete"
    );
    Ok(())
}
