use std::path::PathBuf;
use url::Url;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadTarget {
    pub url: Url,
    pub output_path: PathBuf,
}

impl DownloadTarget {
    pub fn new(url: Url, output_path: impl Into<PathBuf>) -> Self {
        Self {
            url,
            output_path: output_path.into(),
        }
    }
}
