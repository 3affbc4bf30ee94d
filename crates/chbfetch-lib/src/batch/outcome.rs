use std::fmt;

/// Step of the per-entry pipeline that produced a failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Resolving,
    Downloading,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolving => f.write_str("resolving"),
            Self::Downloading => f.write_str("downloading"),
        }
    }
}

#[derive(Debug)]
pub struct EntryFailure {
    pub file_name: String,
    pub stage: Stage,
    pub error: eyre::Report,
}

impl EntryFailure {
    pub fn new(file_name: impl Into<String>, stage: Stage, error: impl Into<eyre::Report>) -> Self {
        Self {
            file_name: file_name.into(),
            stage,
            error: error.into(),
        }
    }
}

impl fmt::Display for EntryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error {} {}: {:#}", self.stage, self.file_name, self.error)
    }
}

#[derive(Debug)]
pub enum EntryOutcome {
    Skipped,
    Downloaded { bytes: u64 },
    Failed(EntryFailure),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub bytes: u64,
}

impl BatchReport {
    pub fn record(&mut self, outcome: &EntryOutcome) {
        match outcome {
            EntryOutcome::Skipped => self.skipped += 1,
            EntryOutcome::Downloaded { bytes } => {
                self.downloaded += 1;
                self.bytes += bytes;
            }
            EntryOutcome::Failed(_) => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.downloaded + self.skipped + self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;

    #[test]
    fn test_report_counts_outcomes() {
        let mut report = BatchReport::default();
        report.record(&EntryOutcome::Skipped);
        report.record(&EntryOutcome::Downloaded { bytes: 500 });
        report.record(&EntryOutcome::Downloaded { bytes: 12 });
        report.record(&EntryOutcome::Failed(EntryFailure::new(
            "chb01_04.edf",
            Stage::Downloading,
            eyre::eyre!("connection reset"),
        )));

        assert_eq!(
            report,
            BatchReport {
                downloaded: 2,
                skipped: 1,
                failed: 1,
                bytes: 512,
            }
        );
        assert_eq!(report.total(), 4);
    }

    #[test]
    fn test_failure_display_names_stage_and_file() {
        let failure = EntryFailure::new(
            "chb01_03.edf",
            Stage::Resolving,
            FetchError::MissingDownloadLink {
                url: "https://physionet.org/content/chbmit/1.0.0/chb01/chb01_03.edf".to_string(),
                reason: "no div with class text-center".to_string(),
            },
        );

        assert_eq!(
            failure.to_string(),
            "Error resolving chb01_03.edf: No download link found on \
             https://physionet.org/content/chbmit/1.0.0/chb01/chb01_03.edf: no div with class text-center"
        );
    }
}
