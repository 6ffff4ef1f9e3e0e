use anyhow::Result;
use cadence::cli::Cli;
use env_logger::Env;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    cli.execute()
}
