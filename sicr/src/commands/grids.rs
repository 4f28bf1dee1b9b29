//! `sicr grids`: show what the configured grids expand to.

use anyhow::Result;
use is_terminal::IsTerminal;
use std::io::{self, Write};

use sicr_core::{RuleKind, SweepConfig, SweepOverrides, ThresholdGrid};

use crate::cli::GridsCommand;
use crate::commands::resolve_config;
use crate::ui::report;
use crate::ui::theme::ThemeMap;

/// Expands every rule's grid, in rule order.
pub fn expand_grids(config: &SweepConfig) -> Result<Vec<(RuleKind, ThresholdGrid)>> {
    let mut grids = Vec::with_capacity(RuleKind::ALL.len());
    for kind in RuleKind::ALL {
        grids.push((kind, config.grids.grid_for(kind)?));
    }
    Ok(grids)
}

pub fn run_grids(cmd: &GridsCommand, theme: &ThemeMap) -> Result<()> {
    let config = resolve_config(&cmd.source, &SweepOverrides::default())?;
    let grids = expand_grids(&config)?;

    let stdout = io::stdout();
    let supports_color = stdout.is_terminal();
    let mut handle = stdout.lock();
    report::print_grids(&mut handle, &grids, theme, supports_color)?;
    handle.flush()?;
    Ok(())
}
