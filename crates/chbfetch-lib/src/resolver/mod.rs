mod identifier;
mod link;

pub use identifier::{owning_identifier, validate_file_name};
pub use link::{LinkExtractionError, LinkResolver, extract_download_path};
