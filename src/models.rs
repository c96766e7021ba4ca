use std::path::PathBuf;
use std::time::Duration;

use serde::{Serialize, Serializer};

/// Outcome of one URL. Holds exactly one downloaded path or one error.
#[derive(Debug, Clone, Serialize)]
pub struct UrlResult {
    pub url: String,
    pub host: String,
    pub downloaded: Vec<PathBuf>,
    pub errors: Vec<String>,
    /// Set when a filter rejected the URL; the reason is in `errors`.
    pub skipped: bool,
    /// Size of the saved body.
    pub bytes: u64,
    #[serde(rename = "elapsed_ms", serialize_with = "as_millis")]
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Skipped,
    Failed,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::Skipped => "skipped",
            Status::Failed => "failed",
        }
    }
}

impl UrlResult {
    pub fn new(url: String, host: String) -> Self {
        Self {
            url,
            host,
            downloaded: Vec::new(),
            errors: Vec::new(),
            skipped: false,
            bytes: 0,
            elapsed: Duration::ZERO,
        }
    }

    pub fn is_success(&self) -> bool {
        !self.downloaded.is_empty() && self.errors.is_empty()
    }

    pub fn status(&self) -> Status {
        if self.is_success() {
            Status::Success
        } else if self.skipped {
            Status::Skipped
        } else {
            Status::Failed
        }
    }
}

fn as_millis<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(elapsed.as_millis() as u64)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub successful: usize,
    /// Every result that is not a success, skipped ones included.
    pub failed: usize,
    pub skipped: usize,
    pub total_bytes: u64,
}

impl RunSummary {
    pub fn from_results(results: &[UrlResult]) -> Self {
        let successful = results.iter().filter(|r| r.is_success()).count();
        Self {
            total: results.len(),
            successful,
            failed: results.len() - successful,
            skipped: results.iter().filter(|r| r.skipped).count(),
            total_bytes: results.iter().map(|r| r.bytes).sum(),
        }
    }
}
