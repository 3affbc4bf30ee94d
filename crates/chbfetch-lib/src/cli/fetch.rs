use crate::batch::{BatchFetcher, BatchReport};
use crate::cli::FetchParams;
use crate::error::FetchError;

pub async fn run_fetch(params: FetchParams) -> Result<BatchReport, FetchError> {
    let FetchParams { class, config } = params;

    tracing::info!(
        "Fetching {} recordings into {}",
        class,
        class.output_dir(&config.base_dir).display()
    );
    let fetcher = BatchFetcher::new(config)?;
    let report = fetcher.run(class).await?;

    tracing::info!(
        "Fetch completed: {} downloaded, {} skipped, {} failed",
        report.downloaded,
        report.skipped,
        report.failed
    );
    Ok(report)
}
