//! Discovery of per-metro data files.
//!
//! The input directory holds one file per metro and year, named
//! `<metroCode>_<year>.json`. Anything else in the directory is ignored.

use crate::error::Error;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A metro data file selected for the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetroFile {
    /// Metro code taken from the file name.
    pub metro: String,
    /// Full path to the file.
    pub path: PathBuf,
}

/// Extract the metro code from `file_name` if it belongs to `year`.
pub fn metro_code_for(file_name: &str, year: u32) -> Option<&str> {
    let suffix = format!("_{}.json", year);
    let code = file_name.strip_suffix(suffix.as_str())?;

    if code.is_empty() {
        None
    } else {
        Some(code)
    }
}

/// List the metro files for `year` in `dir`, sorted by file name.
pub async fn list_metro_files(dir: &Path, year: u32) -> Result<Vec<MetroFile>, Error> {
    let read_error = |source| Error::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = tokio::fs::read_dir(dir).await.map_err(read_error)?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(read_error)? {
        let name = entry.file_name().to_string_lossy().to_string();

        match metro_code_for(&name, year) {
            Some(code) => files.push(MetroFile {
                metro: code.to_string(),
                path: entry.path(),
            }),
            None => debug!("Ignoring {}", name),
        }
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}
