// sicr/src/cli.rs
//! Command-line interface definition for the `sicr` binary: global flags,
//! subcommands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "sicr",
    author = "Obscura Tech",
    version = env!("CARGO_PKG_VERSION"),
    about = "Compare SICR decision thresholds on a loan portfolio",
    long_about = "sicr sweeps two 'significant increase in credit risk' decision rules (an absolute difference and a ratio of current to origination risk) across grids of thresholds, scores every threshold against ground-truth labels with the Matthews Correlation Coefficient, and reports the best threshold per rule.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, conflicts_with = "quiet", help = "Enable debug logging.")]
    pub debug: bool,

    /// Specify the path to a custom YAML theme file.
    #[arg(long = "theme", value_name = "FILE", global = true, help = "Specify the path to a custom YAML theme file.")]
    pub theme: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sweeps both rules over their grids and reports the best thresholds.
    #[command(about = "Sweep both decision rules and report the best threshold per rule.")]
    Run(RunCommand),

    /// Writes a synthetic portfolio to a JSON file.
    #[command(about = "Generate a synthetic portfolio and write it as JSON.")]
    Generate(GenerateCommand),

    /// Prints the threshold grids a configuration expands to.
    #[command(about = "Print the threshold grids of a configuration.")]
    Grids(GridsCommand),
}

/// Where the sweep configuration comes from. Defaults to the embedded reference config.
///
/// `--scenario` takes precedence over `--config`, so a `SICR_CONFIG` set in
/// the environment never blocks picking a scenario by name.
#[derive(Args, Debug, Default, Clone)]
pub struct ConfigSource {
    /// Path to a sweep configuration file (YAML).
    #[arg(long = "config", value_name = "FILE", env = "SICR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Loads a named scenario from ~/.sicr/scenarios, the user config dir or ./config.
    #[arg(long = "scenario", value_name = "NAME")]
    pub scenario: Option<String>,
}

/// Generator overrides shared by `run` and `generate`.
#[derive(Args, Debug, Default, Clone)]
pub struct GeneratorArgs {
    /// Number of synthetic accounts.
    #[arg(long, value_name = "N", env = "SICR_ACCOUNTS")]
    pub accounts: Option<usize>,

    /// Seed for the synthetic portfolio.
    #[arg(long, value_name = "SEED", env = "SICR_SEED")]
    pub seed: Option<u64>,
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunCommand {
    #[command(flatten)]
    pub source: ConfigSource,

    #[command(flatten)]
    pub generator: GeneratorArgs,

    /// Read the portfolio from a JSON file instead of generating one.
    #[arg(long, short = 'i', value_name = "FILE", help = "Read the portfolio from a JSON dataset file.")]
    pub input: Option<PathBuf>,

    /// Evaluate thresholds in parallel.
    #[arg(long, help = "Evaluate thresholds on a thread pool.")]
    pub parallel: bool,

    /// Show only the first N rows of the result table.
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Order of the result table.
    #[arg(long, value_enum, default_value_t = SortOrder::Grid)]
    pub sort: SortOrder,

    /// Print the full report as JSON to stdout instead of tables.
    #[arg(long = "json-stdout", conflicts_with = "json_file")]
    pub json_stdout: bool,

    /// Write the full report as JSON to a file.
    #[arg(long = "json-file", value_name = "FILE")]
    pub json_file: Option<PathBuf>,
}

/// Row ordering for the printed result table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    /// Rule order, then grid order
    Grid,
    /// Descending MCC, ties kept in grid order
    Mcc,
}

/// Arguments for the `generate` command.
#[derive(Parser, Debug)]
pub struct GenerateCommand {
    /// Destination JSON file.
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: PathBuf,

    #[command(flatten)]
    pub generator: GeneratorArgs,

    /// Path to a sweep configuration file whose generator section is used.
    #[arg(long = "config", value_name = "FILE", env = "SICR_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Arguments for the `grids` command.
#[derive(Parser, Debug)]
pub struct GridsCommand {
    #[command(flatten)]
    pub source: ConfigSource,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_defaults() {
        let cli = Cli::try_parse_from(["sicr", "run"]).unwrap();
        match cli.command {
            Commands::Run(cmd) => {
                assert_eq!(cmd.sort, SortOrder::Grid);
                assert!(!cmd.parallel);
                assert!(cmd.top.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn json_outputs_conflict() {
        let res = Cli::try_parse_from(["sicr", "run", "--json-stdout", "--json-file", "out.json"]);
        assert!(res.is_err());
    }

    #[test]
    fn config_and_scenario_parse_together() {
        let cli = Cli::try_parse_from(["sicr", "grids", "--config", "a.yaml", "--scenario", "b"]).unwrap();
        match cli.command {
            Commands::Grids(cmd) => {
                assert_eq!(cmd.source.scenario.as_deref(), Some("b"));
                assert!(cmd.source.config.is_some());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
