use chbfetch_lib::cli::{parse_args, resolve_command, run_fetch};
use chbfetch_lib::error::FetchError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), FetchError> {
    color_eyre::install()?;

    let args = parse_args();
    let params = resolve_command(args.command)?;
    run_fetch(params).await?;

    Ok(())
}
