#[allow(clippy::module_inception)]
mod download;
mod types;

pub use download::{DOWNLOAD_BUFFER_SIZE, download_to_file};
pub use types::DownloadTarget;
