use smoke::cli::CreatePostCli;
use smoke::commands::create_post::run_create_post_command;
use smoke::error::SmokeError;
use smoke::startup::prepare;

use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), SmokeError> {
    let cli = CreatePostCli::parse();
    let config = prepare(&cli.common)?;

    // Terminal states are reported in the log; none changes the exit status.
    run_create_post_command(&config).await?;

    Ok(())
}
