use super::FetchConfig;
use crate::error::FetchError;
use config::Config as ConfigBuilder;

/// Loads the configuration file at `config_path`, or the defaults when no file is given.
pub fn load_config(config_path: Option<&str>) -> Result<FetchConfig, FetchError> {
    let mut builder = ConfigBuilder::builder();
    if let Some(config_path) = config_path {
        builder = builder.add_source(config::File::with_name(config_path));
    }

    builder.build()?.try_deserialize().map_err(Into::into)
}
