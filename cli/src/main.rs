mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{choropleth, contour};

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Choropleth(args) => choropleth::run(&cli, args),
        Commands::Contour(args) => contour::run(&cli, args),
    }
}

/// RUST_LOG wins when set; otherwise -v raises the level warn -> info -> debug.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() -> anyhow::Result<()> { run() }
