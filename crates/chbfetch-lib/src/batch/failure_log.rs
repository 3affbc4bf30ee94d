use crate::error::FetchError;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Appends `file_name` as one line to the failure log, creating the log if needed.
/// The file is opened and closed on every call; lines are never deduplicated.
pub fn append_failure(log_path: &Path, file_name: &str) -> Result<(), FetchError> {
    let failure_log_error = |e: std::io::Error| FetchError::FailureLog {
        path: log_path.to_path_buf(),
        reason: e.to_string(),
    };

    let mut log = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(failure_log_error)?;
    writeln!(log, "{file_name}").map_err(failure_log_error)
}
