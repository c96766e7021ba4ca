use std::path::PathBuf;
use std::time::Duration;

use crate::cli::{Args, ReportFormat};
use crate::filter::ContentFilter;
use crate::ratelimit::RateLimit;

pub const DEFAULT_WORKERS: usize = 10;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_MAX_SIZE: u64 = 100 * 1024 * 1024;

pub const REPORT_TEXT: &str = "report.txt";
pub const REPORT_JSON: &str = "report.json";
pub const REPORT_CSV: &str = "report.csv";
pub const REPORT_MARKDOWN: &str = "report.md";
pub const ARCHIVE_NAME: &str = "output.tar.gz";

/// Run settings, threaded explicitly through every stage.
#[derive(Debug, Clone)]
pub struct Config {
    pub output_dir: PathBuf,
    pub workers: usize,
    pub timeout: Duration,
    pub max_size: u64,
    pub format: ReportFormat,
    pub filter: ContentFilter,
    pub rate_limit: Option<RateLimit>,
    pub archive: bool,
    pub show_progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            workers: DEFAULT_WORKERS,
            timeout: DEFAULT_TIMEOUT,
            max_size: DEFAULT_MAX_SIZE,
            format: ReportFormat::Text,
            filter: ContentFilter::default(),
            rate_limit: None,
            archive: true,
            show_progress: true,
        }
    }
}

impl Config {
    pub fn from_args(args: &Args) -> Self {
        Self {
            output_dir: args.output.clone(),
            workers: args.workers.max(1),
            timeout: Duration::from_secs(args.timeout.max(1)),
            max_size: args.max_size,
            format: args.format,
            filter: ContentFilter::new(
                args.filter_ext.as_deref(),
                args.exclude_ext.as_deref(),
                args.min_size,
                args.skip_empty,
            ),
            rate_limit: args.rate_limit,
            archive: !args.no_archive,
            show_progress: !args.no_progress && !args.quiet,
        }
    }

    /// `<output>/<host>/js/<filename>`
    pub fn destination(&self, host: &str, filename: &str) -> PathBuf {
        self.output_dir.join(host).join("js").join(filename)
    }

    pub fn report_path(&self) -> PathBuf {
        let name = match self.format {
            ReportFormat::Text => REPORT_TEXT,
            ReportFormat::Json => REPORT_JSON,
            ReportFormat::Csv => REPORT_CSV,
            ReportFormat::Markdown => REPORT_MARKDOWN,
        };
        self.output_dir.join(name)
    }

    pub fn archive_path(&self) -> PathBuf {
        self.output_dir.join(ARCHIVE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn clamps_workers_and_timeout() {
        let args = Args::parse_from(["downurl", "-w", "0", "-t", "0", "urls.txt"]);
        let cfg = Config::from_args(&args);
        assert_eq!(cfg.workers, 1);
        assert_eq!(cfg.timeout, Duration::from_secs(1));
    }

    #[test]
    fn quiet_hides_progress() {
        let args = Args::parse_from(["downurl", "-q", "urls.txt"]);
        assert!(!Config::from_args(&args).show_progress);
    }

    #[test]
    fn paths_are_rooted_in_output_dir() {
        let cfg = Config {
            output_dir: PathBuf::from("out"),
            ..Config::default()
        };
        assert_eq!(
            cfg.destination("a.test", "app.js"),
            PathBuf::from("out/a.test/js/app.js")
        );
        assert_eq!(cfg.report_path(), PathBuf::from("out/report.txt"));
        assert_eq!(cfg.archive_path(), PathBuf::from("out/output.tar.gz"));

        let json = Config {
            format: ReportFormat::Json,
            ..cfg
        };
        assert_eq!(json.report_path(), PathBuf::from("out/report.json"));

        let md = Config {
            format: ReportFormat::Markdown,
            ..json
        };
        assert_eq!(md.report_path(), PathBuf::from("out/report.md"));
    }

    #[test]
    fn filter_flags_reach_the_filter() {
        let args = Args::parse_from(["downurl", "--exclude-ext", "png", "urls.txt"]);
        let cfg = Config::from_args(&args);
        assert!(cfg.filter.check_url("https://a.test/x.png").is_err());
        assert!(cfg.filter.check_url("https://a.test/x.js").is_ok());
    }
}
