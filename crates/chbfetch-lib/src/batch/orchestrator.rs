use super::failure_log::append_failure;
use super::outcome::{BatchReport, EntryFailure, EntryOutcome, Stage};
use crate::config::FetchConfig;
use crate::download::{DownloadTarget, download_to_file};
use crate::error::FetchError;
use crate::manifest::{Class, ManifestEntry, load_manifest};
use crate::progress::BatchProgress;
use crate::resolver::{LinkResolver, owning_identifier};
use reqwest::Client;
use std::collections::HashSet;
use std::path::Path;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Names of everything already present in `dir`.
pub fn snapshot_existing(dir: &Path) -> Result<HashSet<String>, FetchError> {
    std::fs::read_dir(dir)?
        .map(|entry| -> Result<String, FetchError> {
            Ok(entry?.file_name().to_string_lossy().into_owned())
        })
        .collect()
}

/// Drives one manifest through resolution and download, one entry at a time.
pub struct BatchFetcher {
    config: FetchConfig,
    client: Client,
    resolver: LinkResolver,
}

impl BatchFetcher {
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: FetchConfig, client: Client) -> Self {
        let resolver = LinkResolver::new(
            client.clone(),
            config.landing_page_base.clone(),
            config.download_host.clone(),
        );
        Self {
            config,
            client,
            resolver,
        }
    }

    /// Fetches every entry of the `class` manifest that is not already on disk.
    ///
    /// Per-entry failures are appended to the class failure log and never abort the batch. Manifest
    /// errors and filesystem errors outside a single transfer do.
    pub async fn run(&self, class: Class) -> Result<BatchReport, FetchError> {
        let base_dir = &self.config.base_dir;
        let output_dir = class.output_dir(base_dir);
        let failure_log = class.failure_log_path(base_dir);

        std::fs::create_dir_all(&output_dir).map_err(|e| FetchError::DirectoryCreation {
            path: output_dir.clone(),
            reason: e.to_string(),
        })?;
        let existing = snapshot_existing(&output_dir)?;

        tracing::info!("Loading manifest from {}", class.manifest_path(base_dir).display());
        let manifest = load_manifest(base_dir, class)?;
        tracing::info!(
            class = %class,
            entries = manifest.len(),
            already_present = existing.len(),
            "Processing manifest"
        );

        let progress = BatchProgress::new(manifest.len(), class, self.config.show_progress);
        let mut report = BatchReport::default();

        for entry in &manifest {
            let outcome = if existing.contains(&entry.file_name) {
                tracing::trace!(file = %entry.file_name, "Already present, skipping");
                EntryOutcome::Skipped
            } else {
                self.fetch_entry(entry, &output_dir, &progress).await
            };

            match &outcome {
                EntryOutcome::Failed(failure) => {
                    append_failure(&failure_log, &failure.file_name)?;
                    progress.suspend(|| tracing::error!("{failure}"));
                }
                EntryOutcome::Downloaded { bytes } => progress.suspend(|| {
                    tracing::info!(file = %entry.file_name, bytes, "Downloaded");
                }),
                EntryOutcome::Skipped => {}
            }

            report.record(&outcome);
            progress.advance();
        }
        progress.finish();

        tracing::info!(
            class = %class,
            downloaded = report.downloaded,
            skipped = report.skipped,
            failed = report.failed,
            bytes = report.bytes,
            "Batch finished"
        );
        if report.failed > 0 {
            tracing::warn!(
                "{} downloads failed, see {}",
                report.failed,
                failure_log.display()
            );
        }

        Ok(report)
    }

    /// Resolves and downloads a single entry into `output_dir`.
    pub async fn fetch_entry(
        &self,
        entry: &ManifestEntry,
        output_dir: &Path,
        progress: &BatchProgress,
    ) -> EntryOutcome {
        let file_name = entry.file_name.as_str();
        tracing::debug!(
            file = file_name,
            patient = owning_identifier(file_name),
            "Resolving download link"
        );

        let url = match self.resolver.resolve(file_name).await {
            Ok(url) => url,
            Err(e) => return EntryOutcome::Failed(EntryFailure::new(file_name, Stage::Resolving, e)),
        };
        let target = DownloadTarget::new(url, output_dir.join(file_name));

        let bar = progress.file_bar(file_name);
        let result = download_to_file(&self.client, &target, &bar).await;
        bar.finish_and_clear();

        match result {
            Ok(bytes) => EntryOutcome::Downloaded { bytes },
            Err(e) => EntryOutcome::Failed(EntryFailure::new(file_name, Stage::Downloading, e)),
        }
    }
}
