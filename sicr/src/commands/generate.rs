//! `sicr generate`: write a synthetic portfolio to disk.

use anyhow::{Context, Result};
use log::debug;

use sicr_core::{generate_portfolio, SweepOverrides};

use crate::cli::{ConfigSource, GenerateCommand};
use crate::commands::{resolve_config, success_msg};
use crate::ui::theme::ThemeMap;

pub fn run_generate(cmd: &GenerateCommand, theme: &ThemeMap, quiet: bool) -> Result<()> {
    let source = ConfigSource { config: cmd.config.clone(), scenario: None };
    let overrides = SweepOverrides {
        accounts: cmd.generator.accounts,
        seed: cmd.generator.seed,
        parallel: None,
    };
    let config = resolve_config(&source, &overrides)?;

    let dataset = generate_portfolio(&config.generator).context("Failed to generate portfolio")?;
    debug!("Generated dataset fingerprint: {}", dataset.fingerprint());
    dataset
        .save_to_file(&cmd.output)
        .with_context(|| format!("Failed to write dataset to {}", cmd.output.display()))?;

    if !quiet {
        success_msg(
            format!(
                "Wrote {} accounts ({:.1}% positive) to {}",
                dataset.len(),
                dataset.positive_rate() * 100.0,
                cmd.output.display()
            ),
            theme,
        );
    }
    Ok(())
}
