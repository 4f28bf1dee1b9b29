// sicr-core/tests/config_integration_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;

use sicr_core::config::{apply_overrides, GridSpec, SweepConfig, SweepOverrides};
use sicr_core::{RuleKind, SicrError};

fn write_yaml(content: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(content.as_bytes())?;
    Ok(file)
}

#[test]
fn test_load_default_config() -> Result<()> {
    let config = SweepConfig::load_default()?;
    assert!(!config.parallel);
    assert_eq!(config.generator.accounts, 1000);
    assert_eq!(config.generator.seed, 42);
    assert_eq!(config.grids.grid_for(RuleKind::AbsoluteDifference)?.len(), 20);
    assert_eq!(config.grids.grid_for(RuleKind::Ratio)?.len(), 21);
    Ok(())
}

#[test]
fn test_load_from_file_partial_overrides() -> Result<()> {
    let file = write_yaml(
        r#"
parallel: true
generator:
  accounts: 250
grids:
  ratio:
    values: [1.25, 1.5, 2.0]
"#,
    )?;
    let config = SweepConfig::load_from_file(file.path())?;

    assert!(config.parallel);
    assert_eq!(config.generator.accounts, 250);
    // Unspecified fields keep their reference values.
    assert_eq!(config.generator.seed, 42);
    assert_eq!(config.grids.abs_diff, GridSpec::range(0.005, 0.100, 0.005));
    assert_eq!(config.grids.grid_for(RuleKind::Ratio)?.values(), &[1.25, 1.5, 2.0]);
    Ok(())
}

#[test]
fn test_load_from_file_rejects_decreasing_grid() -> Result<()> {
    let file = write_yaml(
        r#"
grids:
  abs_diff:
    values: [0.05, 0.01]
"#,
    )?;
    let err = SweepConfig::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, SicrError::Config(ref m) if m.contains("abs_diff")));
    Ok(())
}

#[test]
fn test_load_from_file_rejects_bad_step() -> Result<()> {
    let file = write_yaml(
        r#"
grids:
  ratio:
    start: 1.0
    stop: 3.0
    step: 0.0
"#,
    )?;
    assert!(SweepConfig::load_from_file(file.path()).is_err());
    Ok(())
}

#[test]
fn test_load_from_file_reports_malformed_yaml() -> Result<()> {
    let file = write_yaml("generator: [this is not a mapping")?;
    let err = SweepConfig::load_from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
    Ok(())
}

#[test]
fn test_missing_file_is_an_error() {
    assert!(SweepConfig::load_from_file("/definitely/not/here.yaml").is_err());
}

#[test]
fn test_yaml_round_trip_preserves_config() -> Result<()> {
    let config = apply_overrides(
        SweepConfig::default(),
        &SweepOverrides { accounts: Some(10), seed: Some(9), parallel: None },
    );
    let file = write_yaml(&config.to_yaml()?)?;
    assert_eq!(SweepConfig::load_from_file(file.path())?, config);
    Ok(())
}
