pub mod app;
pub mod archive;
pub mod batch;
pub mod cli;
pub mod config;
pub mod downloader;
pub mod error;
pub mod filter;
pub mod input;
pub mod logging;
pub mod models;
pub mod naming;
pub mod progress;
pub mod ratelimit;
pub mod report;
pub mod table;

pub use app::{run, run_with_cancel, RunOutput};
pub use config::Config;
pub use error::{Error, Result};
pub use input::InputSource;
