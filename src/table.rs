//! Results table printed after a run.

use std::fmt::{self, Write};
use std::time::Duration;

use crate::models::{Status, UrlResult};
use crate::report::format_bytes;

const URL_WIDTH: usize = 40;
const SIZE_WIDTH: usize = 10;
const TIME_WIDTH: usize = 10;
const STATUS_WIDTH: usize = 8;
const MAX_ROWS: usize = 20;

const WIDTHS: [usize; 4] = [URL_WIDTH, SIZE_WIDTH, TIME_WIDTH, STATUS_WIDTH];

/// Box-drawn table of the first 20 results.
pub fn render_table(results: &[UrlResult]) -> String {
    if results.is_empty() {
        return "No results to display".to_string();
    }
    ResultsTable(results).to_string()
}

struct ResultsTable<'a>(&'a [UrlResult]);

impl fmt::Display for ResultsTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_table(f, self.0)
    }
}

fn write_table<W: Write>(out: &mut W, results: &[UrlResult]) -> fmt::Result {
    rule(out, '┌', '┬', '┐')?;
    row(out, ["URL", "Size", "Time", "Status"])?;
    rule(out, '├', '┼', '┤')?;

    for r in results.iter().take(MAX_ROWS) {
        let size = if r.bytes > 0 {
            format_bytes(r.bytes)
        } else {
            "-".to_string()
        };
        let status = match r.status() {
            Status::Success => "OK",
            Status::Skipped => "SKIP",
            Status::Failed => "FAIL",
        };
        row(
            out,
            [&truncate(&r.url, URL_WIDTH), &size, &format_duration(r.elapsed), status],
        )?;
    }

    rule(out, '└', '┴', '┘')?;

    if results.len() > MAX_ROWS {
        writeln!(
            out,
            "\n... and {} more results (see full report)",
            results.len() - MAX_ROWS
        )?;
    }
    Ok(())
}

fn rule<W: Write>(out: &mut W, left: char, mid: char, right: char) -> fmt::Result {
    out.write_char(left)?;
    for (i, width) in WIDTHS.iter().enumerate() {
        if i > 0 {
            out.write_char(mid)?;
        }
        out.write_str(&"─".repeat(width + 2))?;
    }
    writeln!(out, "{right}")
}

fn row<W: Write>(out: &mut W, cells: [&str; 4]) -> fmt::Result {
    out.write_char('│')?;
    for (cell, width) in cells.iter().zip(WIDTHS) {
        write!(out, " {cell:<width$} │")?;
    }
    writeln!(out)
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut cut: String = s.chars().take(width - 3).collect();
    cut.push_str("...");
    cut
}

fn format_duration(d: Duration) -> String {
    let ms = d.as_millis();
    if ms < 1000 {
        format!("{ms}ms")
    } else if ms < 60_000 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m{}s", ms / 60_000, (ms % 60_000) / 1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn ok(url: &str) -> UrlResult {
        let mut r = UrlResult::new(url.into(), "a.test".into());
        r.downloaded.push(PathBuf::from("output/a.test/js/x.js"));
        r.bytes = 1536;
        r.elapsed = Duration::from_millis(250);
        r
    }

    #[test]
    fn empty_results_have_a_message() {
        assert_eq!(render_table(&[]), "No results to display");
    }

    #[test]
    fn rows_are_padded_to_column_widths() {
        let mut bad = UrlResult::new("https://b.test/bad".into(), "b.test".into());
        bad.errors.push("404".into());
        bad.elapsed = Duration::from_millis(1500);

        let table = render_table(&[ok("https://a.test/x.js"), bad]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with('┌') && lines[0].ends_with('┐'));
        assert!(lines[1].starts_with("│ URL "));
        assert!(lines[3].contains("│ 1.5 KB     │ 250ms      │ OK       │"));
        assert!(lines[4].contains("│ -          │ 1.5s       │ FAIL     │"));

        let width = lines[0].chars().count();
        assert!(lines.iter().all(|l| l.chars().count() == width));
    }

    #[test]
    fn long_urls_are_truncated() {
        let url = format!("https://a.test/{}.js", "x".repeat(60));
        let table = render_table(&[ok(&url)]);
        let expected = format!("{}...", &url[..URL_WIDTH - 3]);
        assert!(table.contains(&expected));
        assert!(!table.contains(&url));
    }

    #[test]
    fn only_twenty_rows_are_shown() {
        let results: Vec<UrlResult> = (0..25).map(|i| ok(&format!("https://a.test/{i}.js"))).collect();
        let table = render_table(&results);
        assert_eq!(table.lines().filter(|l| l.contains("│ OK ")).count(), 20);
        assert!(table.ends_with("\n... and 5 more results (see full report)\n"));
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(Duration::from_millis(12)), "12ms");
        assert_eq!(format_duration(Duration::from_millis(2500)), "2.5s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m5s");
    }
}
