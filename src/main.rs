//! de_meta command-line interface

use clap::Parser;
use log::LevelFilter;

use de_meta::cli::{Cli, Commands};
use de_meta::prelude::*;

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    let result = match cli.command {
        Commands::Correlation => run_correlation(&cli.data_dir, &cli.out_dir),
        Commands::Scatter => run_scatter(&cli.data_dir, &cli.out_dir),
        Commands::Pathways => run_pathways(&cli.data_dir, &cli.out_dir),
        Commands::Volcano => run_volcano(&cli.data_dir, &cli.out_dir),
        Commands::All => run_all(&cli.data_dir, &cli.out_dir),
    };

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
