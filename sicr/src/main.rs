// sicr/src/main.rs
//! sicr entry point.
//!
//! Parses the command line, sets up logging and the theme, and dispatches
//! to the selected subcommand. Failures are reported once on stderr and
//! exit with status 1.

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, LevelFilter};
use std::process;

use sicr::cli::{Cli, Commands};
use sicr::commands::{error_msg, generate, grids, run};
use sicr::logger;
use sicr::ui::theme::{build_theme_map, ThemeStyle};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Cli::parse();

    let level = if args.quiet {
        Some(LevelFilter::Off)
    } else if args.debug {
        Some(LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level);
    debug!("Parsed arguments: {:?}", args);

    let theme_map = match build_theme_map(args.theme.as_ref()).context("Theme error") {
        Ok(theme) => theme,
        Err(e) => {
            error_msg(format!("{:#}", e), &ThemeStyle::default_theme_map());
            process::exit(1);
        }
    };

    let outcome = match &args.command {
        Commands::Run(cmd) => run::run_command(cmd, &theme_map, args.quiet),
        Commands::Generate(cmd) => generate::run_generate(cmd, &theme_map, args.quiet),
        Commands::Grids(cmd) => grids::run_grids(cmd, &theme_map),
    };

    if let Err(e) = outcome {
        error_msg(format!("{:#}", e), &theme_map);
        process::exit(1);
    }
    Ok(())
}
