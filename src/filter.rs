//! URL and size filters. A filtered URL is recorded as skipped, never fetched
//! or never written.

use crate::naming::extension_of;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentFilter {
    allowed_ext: Vec<String>,
    blocked_ext: Vec<String>,
    min_size: u64,
    skip_empty: bool,
}

impl ContentFilter {
    /// `filter_ext` and `exclude_ext` are comma-separated; a leading dot is
    /// optional and matching is case-insensitive.
    pub fn new(
        filter_ext: Option<&str>,
        exclude_ext: Option<&str>,
        min_size: u64,
        skip_empty: bool,
    ) -> Self {
        Self {
            allowed_ext: parse_extensions(filter_ext),
            blocked_ext: parse_extensions(exclude_ext),
            min_size,
            skip_empty,
        }
    }

    /// Checked before any request is made.
    pub fn check_url(&self, url: &str) -> Result<(), String> {
        if self.allowed_ext.is_empty() && self.blocked_ext.is_empty() {
            return Ok(());
        }
        let ext = extension_of(url).unwrap_or_default();

        if self.blocked_ext.contains(&ext) {
            return Err(format!("extension blocked: {ext}"));
        }
        if !self.allowed_ext.is_empty() && !self.allowed_ext.contains(&ext) {
            let shown = if ext.is_empty() { "(none)" } else { ext.as_str() };
            return Err(format!("extension not in allowed list: {shown}"));
        }
        Ok(())
    }

    /// Checked against the buffered body.
    pub fn check_size(&self, len: u64) -> Result<(), String> {
        if self.skip_empty && len == 0 {
            return Err("file is empty".to_string());
        }
        if self.min_size > 0 && len < self.min_size {
            return Err(format!(
                "file too small ({len} bytes, min: {})",
                self.min_size
            ));
        }
        Ok(())
    }
}

fn parse_extensions(list: Option<&str>) -> Vec<String> {
    list.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(|e| {
            let e = e.to_ascii_lowercase();
            if e.starts_with('.') { e } else { format!(".{e}") }
        })
        .collect()
}
