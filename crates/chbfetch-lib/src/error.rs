use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to load manifest from {path}: {reason}")]
    ManifestLoad { path: PathBuf, reason: String },

    #[error("Invalid manifest file name {name:?}: {reason}")]
    InvalidFileName { name: String, reason: String },

    #[error("Failed to fetch landing page {url}: {reason}")]
    LandingPage { url: String, reason: String },

    #[error("No download link found on {url}: {reason}")]
    MissingDownloadLink { url: String, reason: String },

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Directory creation failed at {path}: {reason}")]
    DirectoryCreation { path: PathBuf, reason: String },

    #[error("Failed to append to failure log {path}: {reason}")]
    FailureLog { path: PathBuf, reason: String },

    #[error("Invalid command line arguments: {details}")]
    CliArgumentValidation { details: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected error: {0}")]
    Unexpected(#[from] eyre::Report),
}
