use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

pub const DEFAULT_LANDING_PAGE_BASE: &str = "https://physionet.org/content/chbmit/1.0.0/";
pub const DEFAULT_DOWNLOAD_HOST: &str = "https://physionet.org/";

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FetchConfig {
    /// Root directory holding the manifests, the per-class output directories and the failure logs
    pub base_dir: PathBuf,
    /// Landing pages live at `<landing_page_base>/<owning identifier>/<file name>`
    pub landing_page_base: Url,
    /// Site-relative download links are resolved against this URL
    pub download_host: Url,
    pub show_progress: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            landing_page_base: Url::parse(DEFAULT_LANDING_PAGE_BASE)
                .expect("default landing page base is a valid URL"),
            download_host: Url::parse(DEFAULT_DOWNLOAD_HOST)
                .expect("default download host is a valid URL"),
            show_progress: true,
        }
    }
}
