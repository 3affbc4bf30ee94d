mod loader;
mod model;

pub use loader::load_config;
pub use model::{DEFAULT_DOWNLOAD_HOST, DEFAULT_LANDING_PAGE_BASE, FetchConfig};
