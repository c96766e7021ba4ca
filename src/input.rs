use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Where the URL list comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    /// Selected with `-` as the input argument.
    Stdin,
    Single(String),
}

impl InputSource {
    /// `None` when neither a list nor a single URL was given.
    pub fn from_args(input: Option<&Path>, url: Option<&str>) -> Option<Self> {
        if let Some(url) = url {
            return Some(InputSource::Single(url.to_string()));
        }
        match input? {
            path if path == Path::new("-") => Some(InputSource::Stdin),
            path => Some(InputSource::File(path.to_path_buf())),
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::File(path) => write!(f, "{}", path.display()),
            InputSource::Stdin => f.write_str("<stdin>"),
            InputSource::Single(url) => f.write_str(url),
        }
    }
}

/// Reads the URL list: one URL per line, trimmed, blank lines skipped.
/// Order and duplicates are preserved.
pub fn load_urls(source: &InputSource) -> Result<Vec<String>> {
    match source {
        InputSource::File(path) => load_urls_from_file(path),
        InputSource::Stdin => read_urls(io::stdin().lock(), Path::new("-")),
        InputSource::Single(url) => Ok(Some(url.trim())
            .filter(|u| !u.is_empty())
            .map(str::to_string)
            .into_iter()
            .collect()),
    }
}

fn load_urls_from_file(path: &Path) -> Result<Vec<String>> {
    if !path.is_file() {
        return Err(Error::NotAFile(path.to_path_buf()));
    }

    let file = File::open(path).map_err(|source| Error::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    read_urls(BufReader::new(file), path)
}

/// `origin` only names the source in errors.
pub fn read_urls<R: BufRead>(reader: R, origin: &Path) -> Result<Vec<String>> {
    let mut urls = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|source| Error::ReadInput {
            path: origin.to_path_buf(),
            source,
        })?;
        let line = line.trim();
        if !line.is_empty() {
            urls.push(line.to_string());
        }
    }

    Ok(urls)
}
