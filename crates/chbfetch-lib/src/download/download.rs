use super::types::DownloadTarget;
use crate::progress::set_transfer_length;
use eyre::{Result, WrapErr};
use futures::StreamExt;
use indicatif::ProgressBar;
use reqwest::{Client, Response};
use tokio::io::{AsyncWriteExt, BufWriter};

pub const DOWNLOAD_BUFFER_SIZE: usize = 8192;

/// Streams `target.url` into `target.output_path`, returning the number of bytes written.
///
/// The destination is created (or truncated) only after the server answers with a success status.
/// A transfer that fails midway leaves the partial file behind.
pub async fn download_to_file(
    client: &Client,
    target: &DownloadTarget,
    progress: &ProgressBar,
) -> Result<u64> {
    let DownloadTarget { url, output_path } = target;

    let response = client
        .get(url.clone())
        .send()
        .await
        .and_then(Response::error_for_status)
        .wrap_err_with(|| format!("Failed to request {url}"))?;

    let content_length = response.content_length();
    if let Some(length) = content_length {
        set_transfer_length(progress, length);
    }
    tracing::debug!(url = %url, output = %output_path.display(), content_length = ?content_length, "Downloading");

    let file = tokio::fs::File::create(output_path)
        .await
        .wrap_err_with(|| format!("Failed to create output file: {}", output_path.display()))?;
    let mut writer = BufWriter::with_capacity(DOWNLOAD_BUFFER_SIZE, file);

    let mut stream = response.bytes_stream();
    let mut written = 0u64;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.wrap_err_with(|| format!("Failed to read from {url}"))?;
        if chunk.is_empty() {
            continue;
        }

        writer
            .write_all(&chunk)
            .await
            .wrap_err_with(|| format!("Failed to write to {}", output_path.display()))?;
        written += chunk.len() as u64;
        progress.inc(chunk.len() as u64);
    }

    writer
        .flush()
        .await
        .wrap_err_with(|| format!("Failed to flush {}", output_path.display()))?;

    tracing::trace!(url = %url, output = %output_path.display(), bytes = written, "Transfer complete");
    Ok(written)
}
