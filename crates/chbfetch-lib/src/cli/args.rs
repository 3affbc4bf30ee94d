use crate::manifest::Class;
use clap::{ArgAction, Parser};
use tracing::Level;

#[derive(Debug, Clone)]
pub struct Command {
    pub class: Class,
    pub config_path: Option<String>,
    pub base_dir: Option<String>,
    pub no_progress: bool,
}

pub struct Args {
    pub command: Command,
    pub log_level: Level,
}

#[derive(Debug, Parser)]
#[command(
    name = "chbfetch",
    version,
    about = "Download the CHB-MIT EEG recordings listed in a preictal or interictal manifest"
)]
struct Cli {
    #[arg(
        short = 'v',
        long = "verbose",
        help = "Sets the level of verbosity",
        action = ArgAction::Count
    )]
    verbose: u8,

    #[arg(
        short = 'c',
        long = "class",
        visible_alias = "class_",
        value_enum,
        help = "Choose the class i.e. preictal or interictal",
        default_value_t = Class::Interictal
    )]
    class: Class,

    #[arg(
        long = "config",
        value_name = "FILE",
        help = "Optional config file (YAML or TOML) with base_dir, landing_page_base, download_host and show_progress"
    )]
    config: Option<String>,

    #[arg(
        short = 'd',
        long = "base-dir",
        value_name = "DIR",
        help = "Directory holding <class>.json; downloads and failure logs are written here (default: .)"
    )]
    base_dir: Option<String>,

    #[arg(long = "no-progress", help = "Disables progress bars")]
    no_progress: bool,
}

pub fn parse_args() -> Args {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy()
                .add_directive("html5ever=warn".parse().expect("valid directive"))
                .add_directive("selectors=warn".parse().expect("valid directive")),
        )
        .init();

    let command = Command {
        class: cli.class,
        config_path: cli.config,
        base_dir: cli.base_dir,
        no_progress: cli.no_progress,
    };

    Args { command, log_level }
}
