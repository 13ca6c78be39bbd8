//! Newly registered domains feed.
//!
//! The publisher exposes one zip archive per day at
//! `{base}/{base64("YYYY-MM-DD.zip")}/nrd`. The archive holds a single text
//! file with one domain per line.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bytes::Bytes;
use chrono::NaiveDate;
use ipwatch_application::ports::DomainFeed;
use ipwatch_domain::config::DiscoveryConfig;
use ipwatch_domain::DomainError;
use std::io::{Cursor, Read};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

pub struct NrdArchiveFeed {
    client: reqwest::Client,
    base_url: String,
    archive_dir: Option<PathBuf>,
}

impl NrdArchiveFeed {
    pub fn new(cfg: &DiscoveryConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.request_timeout_secs))
            .build()
            .map_err(|e| DomainError::FeedError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: cfg.feed_url.trim_end_matches('/').to_string(),
            archive_dir: cfg.archive_dir.as_ref().map(PathBuf::from),
        })
    }

    pub fn archive_name(date: NaiveDate) -> String {
        format!("{}.zip", date.format("%Y-%m-%d"))
    }

    pub fn archive_url(&self, date: NaiveDate) -> String {
        format!(
            "{}/{}/nrd",
            self.base_url,
            STANDARD.encode(Self::archive_name(date))
        )
    }

    async fn download(&self, url: &str) -> Result<Bytes, DomainError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| DomainError::FeedError(format!("Failed to download {}: {}", url, e)))?;

        response
            .bytes()
            .await
            .map_err(|e| DomainError::FeedError(format!("Failed to read archive body: {}", e)))
    }

    async fn keep_copy(&self, date: NaiveDate, archive: &Bytes) {
        let Some(dir) = &self.archive_dir else {
            return;
        };
        let path = dir.join(Self::archive_name(date));
        let saved = async {
            tokio::fs::create_dir_all(dir).await?;
            tokio::fs::write(&path, archive).await
        }
        .await;

        match saved {
            Ok(()) => debug!(path = %path.display(), "Archive saved"),
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to save archive copy"),
        }
    }
}

/// Reads the first entry of a zip archive as text.
pub fn extract_first_entry(archive: &[u8]) -> Result<String, DomainError> {
    let mut zip = zip::ZipArchive::new(Cursor::new(archive))
        .map_err(|e| DomainError::FeedError(format!("Invalid zip archive: {}", e)))?;

    if zip.is_empty() {
        return Err(DomainError::FeedError("Zip archive is empty".to_string()));
    }

    let mut entry = zip
        .by_index(0)
        .map_err(|e| DomainError::FeedError(format!("Unreadable zip entry: {}", e)))?;
    let mut contents = String::new();
    entry
        .read_to_string(&mut contents)
        .map_err(|e| DomainError::FeedError(format!("Zip entry is not valid text: {}", e)))?;
    Ok(contents)
}

/// Non-blank lines, trimmed.
pub fn split_domains(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[async_trait]
impl DomainFeed for NrdArchiveFeed {
    #[instrument(skip(self))]
    async fn fetch(&self, date: NaiveDate) -> Result<Vec<String>, DomainError> {
        let url = self.archive_url(date);
        info!(url = %url, "Downloading newly registered domains");

        let archive = self.download(&url).await?;
        self.keep_copy(date, &archive).await;

        let contents = tokio::task::spawn_blocking(move || extract_first_entry(&archive))
            .await
            .map_err(|e| DomainError::FeedError(format!("Archive extraction aborted: {}", e)))??;

        let domains = split_domains(&contents);
        info!(count = domains.len(), "Feed archive extracted");
        Ok(domains)
    }
}
