mod cli;
mod commands;
mod config;
mod effects;
mod render;

use anyhow::Result;
use clap::Parser;
use engine_logging::{engine_error, LogDestination};
use log::LevelFilter;

use crate::cli::{Cli, Commands, GlobalArgs};
use crate::config::Config;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.global);

    if let Err(err) = run(cli) {
        engine_error!("command failed: {}", err);
        for cause in err.chain().skip(1) {
            engine_error!("caused by: {}", cause);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.global.config.as_deref())?;
    config.apply_overrides(&cli.global);

    match cli.command {
        Commands::List(args) => commands::list(&config, args),
        Commands::Toggle(args) => commands::toggle(&config, args),
        Commands::Save(args) => commands::save(&config, args),
        Commands::Export(args) => commands::export(&config, args),
    }
}

fn init_logging(args: &GlobalArgs) {
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let destination = match &args.log_file {
        Some(path) => LogDestination::Both(path.clone()),
        None => LogDestination::Terminal,
    };
    engine_logging::initialize(destination, level);
}
