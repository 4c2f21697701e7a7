//! Command-line arguments for the two smoke binaries.

use smoke_core::config::ProbeConfig;
use smoke_core::probe::ProbeParams;

use std::path::PathBuf;

use clap::{Args, Parser};

/// Options shared by both binaries.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Path to a smoke.toml config file (defaults to ./smoke.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory for smoke.log; stdout only when omitted
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Parser)]
#[command(name = "smoke-probe", version)]
#[command(about = "Send one GET /test?a=<a>&b=<b> and print the response", long_about = None)]
pub struct ProbeCli {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Value for the `a` query parameter (overrides config)
    #[arg(short = 'a', long, allow_negative_numbers = true)]
    pub a: Option<f64>,

    /// Value for the `b` query parameter (overrides config)
    #[arg(short = 'b', long, allow_negative_numbers = true)]
    pub b: Option<f64>,
}

impl ProbeCli {
    /// Command-line values win over the configured ones.
    pub fn params(&self, config: &ProbeConfig) -> ProbeParams {
        ProbeParams::new(self.a.unwrap_or(config.a), self.b.unwrap_or(config.b))
    }
}

#[derive(Debug, Parser)]
#[command(name = "smoke-create-post", version)]
#[command(about = "Log in, then create a post with the returned token", long_about = None)]
pub struct CreatePostCli {
    #[command(flatten)]
    pub common: CommonArgs,
}
