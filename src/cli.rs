use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Git history analysis tool for per-author daily change statistics")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, help = "Path to git repository")]
    pub repo: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Daily change statistics for one author
    Stats {
        #[arg(long, help = "Author email to report on")]
        author: String,

        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Distinct authors seen in the history
    Authors {
        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Stats { author, json, ndjson } => {
                crate::stats::exec(self.common, author, json, ndjson)
            }
            Commands::Authors { json } => crate::authors::exec(self.common, json),
        }
    }
}
