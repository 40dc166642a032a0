use std::path::Path;

use thiserror::Error;

/// Maximum file size accepted at the selection boundary.
pub const MAX_CSV_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// Maximum number of lines forwarded to the analysis backend.
pub const MAX_ROWS_FOR_ANALYSIS: usize = 3000;

/// A file rejected before ingestion. Raised at the selection boundary, never
/// by [`ingest`] itself.
#[derive(Debug, Error)]
pub enum IngestionError {
    #[error("file is {actual} bytes, over the {limit} byte limit")]
    Oversized { actual: u64, limit: u64 },
    #[error("could not read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("file is not valid UTF-8 text")]
    NotText(#[from] std::string::FromUtf8Error),
}

/// Cap raw CSV text at [`MAX_ROWS_FOR_ANALYSIS`] lines.
///
/// Total over any text input: at or under the cap the input comes back
/// unchanged; over it, the first 3000 `'\n'`-separated segments are rejoined
/// with `'\n'`, preserving content and order (CRLF line endings keep their
/// `'\r'` inside the segments).
pub fn ingest(raw: &str) -> String {
    let lines: Vec<&str> = raw.split('\n').collect();
    if lines.len() <= MAX_ROWS_FOR_ANALYSIS {
        return raw.to_string();
    }
    log::debug!(
        "truncating input from {} to {} lines",
        lines.len(),
        MAX_ROWS_FOR_ANALYSIS
    );
    lines[..MAX_ROWS_FOR_ANALYSIS].join("\n")
}

/// Load a user-selected CSV file, enforcing the byte cap before the contents
/// are read and decoded. Returns the display name and the raw text.
pub fn load_csv_file(path: &Path) -> Result<(String, String), IngestionError> {
    let meta = std::fs::metadata(path)?;
    if meta.len() > MAX_CSV_SIZE_BYTES {
        return Err(IngestionError::Oversized {
            actual: meta.len(),
            limit: MAX_CSV_SIZE_BYTES,
        });
    }
    let bytes = std::fs::read(path)?;
    let text = String::from_utf8(bytes)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok((name, text))
}
