use std::fs;
use std::path::PathBuf;

use tokio::task;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::archive::create_tar_gz;
use crate::batch::run_batch;
use crate::config::Config;
use crate::downloader::Downloader;
use crate::error::{Error, Result};
use crate::input::{load_urls, InputSource};
use crate::models::{RunSummary, UrlResult};
use crate::report::write_report;

#[derive(Debug)]
pub struct RunOutput {
    pub results: Vec<UrlResult>,
    pub summary: RunSummary,
    pub report_path: PathBuf,
    pub archive_path: Option<PathBuf>,
    /// The run was interrupted; unfinished URLs are recorded as cancelled.
    pub cancelled: bool,
}

/// Load, download, report, archive.
pub async fn run(config: &Config, source: &InputSource) -> Result<RunOutput> {
    run_with_cancel(config, source, CancellationToken::new()).await
}

/// Like [`run`], stopping early once `cancel` fires. The report and archive
/// are still written for whatever completed.
pub async fn run_with_cancel(
    config: &Config,
    source: &InputSource,
    cancel: CancellationToken,
) -> Result<RunOutput> {
    let urls = load_urls(source)?;
    info!(count = urls.len(), input = %source, "loaded URLs");

    fs::create_dir_all(&config.output_dir).map_err(|source| Error::CreateDir {
        path: config.output_dir.clone(),
        source,
    })?;

    let downloader = Downloader::new(config)?;
    let results = run_batch(config, &downloader, urls, &cancel).await?;

    let cancelled = cancel.is_cancelled();
    if cancelled {
        warn!("run cancelled, writing partial report");
    }

    let report_path = config.report_path();
    write_report(&report_path, config.format, &results)?;
    info!(path = %report_path.display(), "report written");

    let archive_path = if config.archive {
        let tree = config.output_dir.clone();
        let dest = config.archive_path();
        let path = dest.clone();
        task::spawn_blocking(move || create_tar_gz(&tree, &dest)).await??;
        info!(path = %path.display(), "archive created");
        Some(path)
    } else {
        None
    };

    let summary = RunSummary::from_results(&results);
    Ok(RunOutput {
        results,
        summary,
        report_path,
        archive_path,
        cancelled,
    })
}
