use crate::cli::args::Command;
use crate::cli::params::FetchParams;
use crate::config::load_config;
use crate::error::FetchError;
use std::path::PathBuf;

/// Loads the configuration named by `command` and applies the command-line overrides on top of it.
pub fn resolve_command(command: Command) -> Result<FetchParams, FetchError> {
    let Command {
        class,
        config_path,
        base_dir,
        no_progress,
    } = command;

    let mut config = load_config(config_path.as_deref())?;

    if let Some(base_dir) = base_dir {
        config.base_dir = PathBuf::from(base_dir);
    }
    if no_progress {
        config.show_progress = false;
    }

    if config.base_dir.as_os_str().is_empty() {
        return Err(FetchError::CliArgumentValidation {
            details: "Base directory must not be empty. Pass --base-dir or configure base_dir."
                .to_string(),
        });
    }

    for (name, url) in [
        ("landing_page_base", &config.landing_page_base),
        ("download_host", &config.download_host),
    ] {
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(FetchError::CliArgumentValidation {
                details: format!("{name} must be an http(s) URL, got {url}"),
            });
        }
    }

    Ok(FetchParams { class, config })
}
