use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::ratelimit::RateLimit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
    Csv,
    #[value(alias = "md")]
    Markdown,
}

#[derive(Parser, Debug)]
#[command(name = "downurl")]
#[command(author, version, about = "Download every URL in a file, report, and archive the results", long_about = None)]
pub struct Args {
    /// File with one URL per line, or `-` for stdin
    pub input: Option<PathBuf>,

    /// Download a single URL instead of reading a list
    #[arg(short, long, conflicts_with = "input")]
    pub url: Option<String>,

    /// Output directory
    #[arg(short, long, default_value = "output")]
    pub output: PathBuf,

    /// Number of parallel downloads (1 = strictly sequential)
    #[arg(short, long, default_value = "10")]
    pub workers: usize,

    /// Per-request timeout in seconds
    #[arg(short, long, default_value = "15")]
    pub timeout: u64,

    /// Largest response body accepted, in bytes
    #[arg(long, default_value = "104857600")]
    pub max_size: u64,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ReportFormat,

    /// Request rate cap, e.g. `10/minute`, `5/s`, `100/1h`
    #[arg(long)]
    pub rate_limit: Option<RateLimit>,

    /// Only download these extensions (comma-separated, e.g. `js,css`)
    #[arg(long)]
    pub filter_ext: Option<String>,

    /// Never download these extensions (comma-separated)
    #[arg(long)]
    pub exclude_ext: Option<String>,

    /// Skip bodies smaller than this many bytes
    #[arg(long, default_value = "0")]
    pub min_size: u64,

    /// Skip empty bodies
    #[arg(long)]
    pub skip_empty: bool,

    /// Skip creating output.tar.gz
    #[arg(long)]
    pub no_archive: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Debug logging on stderr
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors, no progress bar or results table
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn usage() -> String {
    "Usage: downurl <urls.txt> [options]\n\nFor help: downurl --help".to_string()
}
