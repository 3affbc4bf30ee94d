use chbfetch_lib::manifest::{Class, ManifestEntry};
use eyre::Result;
use mockito::{Matcher, Mock, ServerGuard};
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

pub const LANDING_PAGE_PREFIX: &str = "/content/chbmit/1.0.0";

/// Mirrors the part of a PhysioNet landing page the resolver looks at.
pub fn landing_page_html(href: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
  <head><title>CHB-MIT Scalp EEG Database</title></head>
  <body>
    <nav><a href="/about/">About</a></nav>
    <div class="col-md-12 text-center">
      <a class="btn btn-primary" href="{href}" rel="nofollow">Download</a>
    </div>
  </body>
</html>"#
    )
}

pub fn landing_page_path(patient: &str, file_name: &str) -> String {
    format!("{LANDING_PAGE_PREFIX}/{patient}/{file_name}")
}

/// Landing page mock for one recording. Not registered until `create_async` is called on it.
pub fn landing_page_mock(
    server: &mut ServerGuard,
    patient: &str,
    file_name: &str,
    html: &str,
) -> Mock {
    server
        .mock("GET", landing_page_path(patient, file_name).as_str())
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(html)
}

fn recording_path(path: &str) -> Matcher {
    Matcher::Regex(format!("^{}", regex::escape(path)))
}

/// Recording mock matching `path` with or without a query string.
pub fn recording_mock(server: &mut ServerGuard, path: &str, body: &[u8]) -> Mock {
    server
        .mock("GET", recording_path(path))
        .with_status(200)
        .with_header("content-type", "application/octet-stream")
        .with_body(body)
}

/// Recording mock that sends `sent` and then drops the transfer.
pub fn interrupted_recording_mock(server: &mut ServerGuard, path: &str, sent: &[u8]) -> Mock {
    let sent = sent.to_vec();
    server
        .mock("GET", recording_path(path))
        .with_status(200)
        .with_header("content-type", "application/octet-stream")
        .with_chunked_body(move |w| {
            w.write_all(&sent)?;
            Err(std::io::Error::other("transfer interrupted"))
        })
}

pub fn write_manifest(base_dir: &Path, class: Class, file_names: &[&str]) -> Result<()> {
    let entries: Vec<ManifestEntry> = file_names
        .iter()
        .map(|name| ManifestEntry::new(*name))
        .collect();
    std::fs::write(
        class.manifest_path(base_dir),
        serde_json::to_string_pretty(&entries)?,
    )?;
    Ok(())
}

/// Writes a config file pointing both PhysioNet endpoints at `server`.
pub fn write_config(base_dir: &Path, server: &ServerGuard) -> Result<std::path::PathBuf> {
    let config_path = base_dir.join("chbfetch.yaml");
    tracing::debug!(path = %config_path.display(), server = %server.url(), "Writing test config");
    std::fs::write(
        &config_path,
        format!(
            "landing_page_base: \"{url}{LANDING_PAGE_PREFIX}/\"\ndownload_host: \"{url}/\"\nshow_progress: false\n",
            url = server.url()
        ),
    )?;
    Ok(config_path)
}

pub fn setup_test_environment(class: Class, file_names: &[&str]) -> Result<TempDir> {
    let temp_dir = tempfile::tempdir()?;
    tracing::debug!(dir = %temp_dir.path().display(), %class, entries = file_names.len(), "Setting up test environment");
    write_manifest(temp_dir.path(), class, file_names)?;
    Ok(temp_dir)
}

pub fn read_failure_log(base_dir: &Path, class: Class) -> Vec<String> {
    std::fs::read_to_string(class.failure_log_path(base_dir))
        .map(|content| content.lines().map(str::to_string).collect())
        .unwrap_or_default()
}
