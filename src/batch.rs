use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tokio::task;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::downloader::{Downloader, FetchOutcome, CANCELLED};
use crate::error::{Error, Result};
use crate::models::UrlResult;
use crate::naming::{filename_from_url, host_from_url};
use crate::progress;
use crate::ratelimit::RateLimiter;

/// Downloads every URL, at most `config.workers` at a time.
///
/// The returned results line up with `urls` index for index, whatever order
/// the downloads finish in. Once `cancel` fires, URLs not yet finished are
/// recorded as cancelled. The first filesystem error aborts the batch.
pub async fn run_batch(
    config: &Config,
    downloader: &Downloader,
    urls: Vec<String>,
    cancel: &CancellationToken,
) -> Result<Vec<UrlResult>> {
    let pb = progress::batch_bar(urls.len(), config.show_progress);
    let semaphore = Arc::new(Semaphore::new(config.workers));
    let limiter = config.rate_limit.map(|limit| Arc::new(RateLimiter::new(limit)));

    info!(count = urls.len(), workers = config.workers, "downloading");
    if let Some(limit) = config.rate_limit {
        info!(%limit, "rate limited");
    }

    let mut handles = Vec::with_capacity(urls.len());

    for url in urls {
        let host = host_from_url(&url);
        let dest = config.destination(&host, &filename_from_url(&url));
        let downloader = downloader.clone();
        let limiter = limiter.clone();
        let cancel = cancel.clone();
        let pb = pb.clone();

        // The semaphore is never closed.
        let permit = tokio::select! {
            permit = Arc::clone(&semaphore).acquire_owned() => Some(permit.expect("semaphore closed")),
            _ = cancel.cancelled() => None,
        };

        let handle = task::spawn(async move {
            let mut result = UrlResult::new(url, host);
            let started = Instant::now();

            let outcome = match permit {
                Some(permit) => {
                    let outcome =
                        process(&downloader, limiter.as_deref(), &result.url, &dest, &cancel).await;
                    drop(permit);
                    outcome?
                }
                None => FetchOutcome::Failed(CANCELLED.to_string()),
            };

            match outcome {
                FetchOutcome::Saved { path, bytes } => {
                    result.downloaded.push(path);
                    result.bytes = bytes;
                }
                FetchOutcome::Skipped(reason) => {
                    debug!(url = %result.url, %reason, "skipped");
                    result.errors.push(format!("skipped: {reason}"));
                    result.skipped = true;
                }
                FetchOutcome::Failed(message) => {
                    if message != CANCELLED {
                        warn!(url = %result.url, error = %message, "download failed");
                    }
                    result.errors.push(message);
                }
            }
            result.elapsed = started.elapsed();

            progress::println(&format!(
                "[*] Processed {} -> Downloaded: {}, Errors: {}",
                result.url,
                result.downloaded.len(),
                result.errors.len()
            ));
            pb.inc(1);

            Ok::<_, Error>(result)
        });

        handles.push(handle);
    }

    let mut results = Vec::with_capacity(handles.len());
    for joined in join_all(handles).await {
        results.push(joined??);
    }

    progress::finish(&pb);
    Ok(results)
}

async fn process(
    downloader: &Downloader,
    limiter: Option<&RateLimiter>,
    url: &str,
    dest: &Path,
    cancel: &CancellationToken,
) -> Result<FetchOutcome> {
    if cancel.is_cancelled() {
        return Ok(FetchOutcome::Failed(CANCELLED.to_string()));
    }
    if let Err(reason) = downloader.filter().check_url(url) {
        return Ok(FetchOutcome::Skipped(reason));
    }
    if let Some(limiter) = limiter {
        tokio::select! {
            _ = limiter.acquire() => {}
            _ = cancel.cancelled() => return Ok(FetchOutcome::Failed(CANCELLED.to_string())),
        }
    }
    downloader.fetch(url, dest, cancel).await
}
