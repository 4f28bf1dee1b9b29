//! Subcommand implementations and the helpers they share.

pub mod generate;
pub mod grids;
pub mod run;

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, warn};
use std::io;

use sicr_core::{apply_overrides, load_scenario_by_name, SweepConfig, SweepOverrides};

use crate::cli::ConfigSource;
use crate::ui::output_format;
use crate::ui::theme::ThemeMap;

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing success messages to stderr.
pub fn success_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_success_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing warning messages to stderr.
pub fn warn_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Resolves the sweep configuration: a named scenario, then a config file,
/// then the embedded reference config. Overrides are applied last and the
/// merged result is validated again.
pub fn resolve_config(source: &ConfigSource, overrides: &SweepOverrides) -> Result<SweepConfig> {
    let base = if let Some(name) = &source.scenario {
        if let Some(path) = &source.config {
            warn!("Scenario '{}' takes precedence over config file {}", name, path.display());
        }
        load_scenario_by_name(name).with_context(|| format!("Failed to load scenario '{}'", name))?
    } else if let Some(path) = &source.config {
        SweepConfig::load_from_file(path)
            .with_context(|| format!("Failed to load configuration '{}'", path.display()))?
    } else {
        SweepConfig::load_default().context("Failed to load the default configuration")?
    };

    let config = apply_overrides(base, overrides);
    config.validate().context("Invalid configuration after applying command-line overrides")?;
    debug!("Resolved configuration: {:?}", config);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_when_no_source_given() {
        let config = resolve_config(&ConfigSource::default(), &SweepOverrides::default()).unwrap();
        assert_eq!(config, SweepConfig::load_default().unwrap());
    }

    #[test]
    fn overrides_are_applied_and_validated() {
        let overrides = SweepOverrides { accounts: Some(50), seed: Some(9), parallel: Some(true) };
        let config = resolve_config(&ConfigSource::default(), &overrides).unwrap();
        assert_eq!(config.generator.accounts, 50);
        assert_eq!(config.generator.seed, 9);
        assert!(config.parallel);

        let bad = SweepOverrides { accounts: Some(0), ..Default::default() };
        assert!(resolve_config(&ConfigSource::default(), &bad).is_err());
    }

    #[test]
    fn config_file_takes_precedence() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "generator:\n  accounts: 12\n").unwrap();
        let source = ConfigSource { config: Some(file.path().to_path_buf()), scenario: None };
        let config = resolve_config(&source, &SweepOverrides::default()).unwrap();
        assert_eq!(config.generator.accounts, 12);
    }
}
