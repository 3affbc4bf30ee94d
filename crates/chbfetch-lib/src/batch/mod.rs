mod failure_log;
mod orchestrator;
mod outcome;

pub use failure_log::append_failure;
pub use orchestrator::{BatchFetcher, snapshot_existing};
pub use outcome::{BatchReport, EntryFailure, EntryOutcome, Stage};
