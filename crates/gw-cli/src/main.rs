use anyhow::Result;
use gw_cli::{Cli, Commands, Parser};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => args.run(),
        Commands::Tag(args) => args.run(),
    }
}
