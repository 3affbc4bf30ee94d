pub mod batch;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod manifest;
pub mod progress;
pub mod resolver;

pub use self::config::FetchConfig;
pub use self::error::FetchError;
