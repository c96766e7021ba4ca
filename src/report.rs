use std::fmt;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cli::ReportFormat;
use crate::error::{Error, Result};
use crate::models::{RunSummary, UrlResult};

/// Plain-text report: one block per result, in processing order.
pub fn render_text(results: &[UrlResult]) -> String {
    TextReport(results).to_string()
}

struct TextReport<'a>(&'a [UrlResult]);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in self.0 {
            writeln!(f, "URL: {}", r.url)?;
            writeln!(f, "HOST: {}", r.host)?;
            writeln!(f, "Downloaded: {}", r.downloaded.len())?;
            for path in &r.downloaded {
                writeln!(f, "  - {}", path.display())?;
            }
            writeln!(f, "Errors: {}", r.errors.len())?;
            for err in &r.errors {
                writeln!(f, "  - {}", err)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    summary: RunSummary,
    results: &'a [UrlResult],
}

pub fn render_json(results: &[UrlResult]) -> Result<String> {
    let report = JsonReport {
        generated_at: Utc::now(),
        summary: RunSummary::from_results(results),
        results,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

const CSV_HEADER: [&str; 7] = ["url", "host", "path", "size", "elapsed_ms", "status", "error"];

/// One row per result; several errors are joined with `; `.
pub fn render_csv(results: &[UrlResult]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for r in results {
        let path = r
            .downloaded
            .first()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        let size = r.bytes.to_string();
        let elapsed = r.elapsed.as_millis().to_string();
        let error = r.errors.join("; ");
        writer.write_record([
            r.url.as_str(),
            r.host.as_str(),
            path.as_str(),
            size.as_str(),
            elapsed.as_str(),
            r.status().as_str(),
            error.as_str(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| Error::Csv(csv::Error::from(e.into_error())))
}

pub fn render_markdown(results: &[UrlResult]) -> String {
    MarkdownReport {
        generated_at: Utc::now(),
        results,
    }
    .to_string()
}

struct MarkdownReport<'a> {
    generated_at: DateTime<Utc>,
    results: &'a [UrlResult],
}

impl fmt::Display for MarkdownReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = RunSummary::from_results(self.results);

        writeln!(f, "# Download Report\n")?;
        writeln!(f, "## Run Information\n")?;
        writeln!(f, "- **Generated**: {}", self.generated_at.to_rfc3339())?;
        writeln!(f, "- **Total URLs**: {}", summary.total)?;
        writeln!(f, "- **Successful**: {}", summary.successful)?;
        writeln!(f, "- **Failed**: {}", summary.failed)?;
        writeln!(f, "- **Skipped**: {}\n", summary.skipped)?;

        writeln!(f, "## Statistics\n")?;
        writeln!(f, "- **Total Files**: {}", summary.successful)?;
        writeln!(f, "- **Total Size**: {}\n", format_bytes(summary.total_bytes))?;

        if self.results.is_empty() {
            return Ok(());
        }

        writeln!(f, "## Results\n")?;
        writeln!(f, "| URL | Status | Size | Error |")?;
        writeln!(f, "|---|---|---|---|")?;
        for r in self.results {
            let size = if r.bytes > 0 {
                format_bytes(r.bytes)
            } else {
                "-".to_string()
            };
            writeln!(
                f,
                "| {} | {} | {} | {} |",
                escape_cell(&r.url),
                r.status().as_str(),
                size,
                escape_cell(&r.errors.join("; "))
            )?;
        }
        Ok(())
    }
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|")
}

/// `512 B`, `1.5 KB`, `3.0 MB`.
pub fn format_bytes(bytes: u64) -> String {
    const UNIT: u64 = 1024;
    if bytes < UNIT {
        return format!("{bytes} B");
    }
    let mut div = UNIT;
    let mut exp = 0;
    let mut n = bytes / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }
    let unit = ['K', 'M', 'G', 'T', 'P', 'E'][exp];
    format!("{:.1} {}B", bytes as f64 / div as f64, unit)
}

pub fn write_report(path: &Path, format: ReportFormat, results: &[UrlResult]) -> Result<()> {
    let content = match format {
        ReportFormat::Text => render_text(results).into_bytes(),
        ReportFormat::Json => render_json(results)?.into_bytes(),
        ReportFormat::Csv => render_csv(results)?,
        ReportFormat::Markdown => render_markdown(results).into_bytes(),
    };

    fs::write(path, content).map_err(|source| Error::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}
