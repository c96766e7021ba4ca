use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors. Anything here ends the run; per-URL network failures are
/// recorded on the result instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("the argument must be a file of URLs: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("failed to read URL file {}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}", path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error("failed to serialize report")]
    Report(#[from] serde_json::Error),

    #[error("failed to write CSV report")]
    Csv(#[from] csv::Error),

    #[error("failed to create archive {}", path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("download task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Renders an error and its whole source chain on one line.
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
