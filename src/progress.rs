//! Process-wide progress display. Log lines go through [`SuspendingStderr`]
//! so they are printed above the bar instead of through it.

use std::io::{self, Write};
use std::sync::OnceLock;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

static MULTI: OnceLock<MultiProgress> = OnceLock::new();

pub fn multi() -> &'static MultiProgress {
    MULTI.get_or_init(MultiProgress::new)
}

/// Overall bar for a batch of `len` URLs; hidden when `visible` is false.
pub fn batch_bar(len: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = multi().add(ProgressBar::new(len as u64));
    if let Ok(style) = ProgressStyle::default_bar().template("{msg} {bar:40} {pos}/{len}") {
        pb.set_style(style.progress_chars("=>-"));
    }
    pb.set_message("Downloading");
    pb
}

/// Clears `pb` and detaches it from the shared display.
pub fn finish(pb: &ProgressBar) {
    pb.finish_and_clear();
    multi().remove(pb);
}

/// Prints a line on stdout with the bars cleared.
pub fn println(line: &str) {
    multi().suspend(|| println!("{line}"));
}

/// Stderr writer that hides the bars for the duration of each write.
pub struct SuspendingStderr;

impl Write for SuspendingStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        multi().suspend(|| io::stderr().write(buf))
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        multi().suspend(|| io::stderr().write_all(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_bar_is_not_attached() {
        let pb = batch_bar(3, false);
        assert!(pb.is_hidden());
        pb.inc(1);
        finish(&pb);
    }

    #[test]
    fn writer_passes_bytes_through() {
        let mut w = SuspendingStderr;
        assert_eq!(w.write(b"").unwrap(), 0);
        w.write_all(b"").unwrap();
        w.flush().unwrap();
    }
}
