use smoke::cli::ProbeCli;
use smoke::commands::probe::run_probe_command;
use smoke::error::SmokeError;
use smoke::startup::prepare;

use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), SmokeError> {
    let cli = ProbeCli::parse();
    let config = prepare(&cli.common)?;

    // The report is already logged; a failed probe is not a process failure.
    run_probe_command(&config, cli.params(&config.probe)).await?;

    Ok(())
}
