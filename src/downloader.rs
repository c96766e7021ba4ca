use std::path::{Path, PathBuf};

use reqwest::Client;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::Config;
use crate::error::{error_chain, Error, Result};
use crate::filter::ContentFilter;

pub const CANCELLED: &str = "download cancelled by user";

/// What happened to a single GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Saved { path: PathBuf, bytes: u64 },
    /// A filter rejected the body; nothing was written.
    Skipped(String),
    Failed(String),
}

#[derive(Clone)]
pub struct Downloader {
    client: Client,
    max_size: u64,
    filter: ContentFilter,
}

impl Downloader {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(Error::HttpClient)?;

        Ok(Self {
            client,
            max_size: config.max_size,
            filter: config.filter.clone(),
        })
    }

    pub fn filter(&self) -> &ContentFilter {
        &self.filter
    }

    /// One GET, body buffered in full, written to `dest` on a 2xx.
    ///
    /// Network and HTTP failures come back as `FetchOutcome::Failed` and leave
    /// the filesystem untouched, as does cancellation while the request is in
    /// flight. Filesystem failures are returned as `Err`.
    pub async fn fetch(
        &self,
        url: &str,
        dest: &Path,
        cancel: &CancellationToken,
    ) -> Result<FetchOutcome> {
        let body = tokio::select! {
            body = self.get(url) => body,
            _ = cancel.cancelled() => Err(CANCELLED.to_string()),
        };
        let body = match body {
            Ok(body) => body,
            Err(message) => return Ok(FetchOutcome::Failed(message)),
        };

        let bytes = body.len() as u64;
        if let Err(reason) = self.filter.check_size(bytes) {
            debug!(url, bytes, %reason, "body filtered");
            return Ok(FetchOutcome::Skipped(reason));
        }

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| Error::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        tokio::fs::write(dest, &body)
            .await
            .map_err(|source| Error::WriteFile {
                path: dest.to_path_buf(),
                source,
            })?;

        debug!(url, path = %dest.display(), bytes, "saved");
        Ok(FetchOutcome::Saved {
            path: dest.to_path_buf(),
            bytes,
        })
    }

    async fn get(&self, url: &str) -> std::result::Result<Vec<u8>, String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| error_chain(&e))?;

        if let Some(len) = response.content_length() {
            if len > self.max_size {
                return Err(self.too_large(len));
            }
        }

        let body = response.bytes().await.map_err(|e| error_chain(&e))?;
        if body.len() as u64 > self.max_size {
            return Err(self.too_large(body.len() as u64));
        }

        Ok(body.to_vec())
    }

    fn too_large(&self, len: u64) -> String {
        format!(
            "response too large: {} bytes exceeds limit of {} bytes",
            len, self.max_size
        )
    }
}
