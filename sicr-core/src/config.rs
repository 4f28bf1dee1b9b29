//! Configuration management for `sicr-core`.
//!
//! This module defines the sweep configuration: the threshold grid for each
//! decision rule, the synthetic portfolio parameters, and whether thresholds
//! are evaluated in parallel. It handles YAML (de)serialization, the embedded
//! reference configuration, named scenario lookup, and CLI-style overrides.
//!
//! License: MIT OR Apache-2.0

use anyhow::Context;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::{SicrError, SicrResult};
use crate::rules::RuleKind;

/// Upper bound on the number of points a `{start, stop, step}` grid may expand to.
pub const MAX_GRID_POINTS: usize = 1_000_000;

/// Decimal places kept when expanding a range grid.
const GRID_DECIMALS: i32 = 10;

/// How a threshold grid is written in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GridSpec {
    /// Inclusive range: `start, start + step, ..., stop`.
    Range { start: f64, stop: f64, step: f64 },
    /// An explicit, strictly increasing list of thresholds.
    Values { values: Vec<f64> },
}

impl GridSpec {
    pub fn range(start: f64, stop: f64, step: f64) -> Self {
        GridSpec::Range { start, stop, step }
    }

    /// Expands the grid description and validates the result.
    pub fn build(&self) -> SicrResult<ThresholdGrid> {
        match self {
            GridSpec::Range { start, stop, step } => expand_range(*start, *stop, *step),
            GridSpec::Values { values } => ThresholdGrid::new(values.clone()),
        }
    }
}

fn expand_range(start: f64, stop: f64, step: f64) -> SicrResult<ThresholdGrid> {
    if !(start.is_finite() && stop.is_finite() && step.is_finite()) {
        return Err(SicrError::Config(format!(
            "Grid range must be finite (start={}, stop={}, step={}).",
            start, stop, step
        )));
    }
    if step <= 0.0 {
        return Err(SicrError::Config(format!("Grid step must be positive, got {}.", step)));
    }
    let resolution = 10f64.powi(-GRID_DECIMALS);
    if step < resolution {
        return Err(SicrError::Config(format!(
            "Grid step {} is finer than the grid resolution of {}.",
            step, resolution
        )));
    }
    if stop < start {
        return Err(SicrError::Config(format!(
            "Grid stop ({}) is smaller than start ({}).",
            stop, start
        )));
    }

    // The tolerance keeps `stop` in the grid when (stop - start) / step lands just below an integer.
    let intervals = ((stop - start) / step + 1e-9).floor();
    if intervals >= MAX_GRID_POINTS as f64 {
        return Err(SicrError::Config(format!(
            "Grid from {} to {} by {} exceeds {} points.",
            start, stop, step, MAX_GRID_POINTS
        )));
    }

    let scale = 10f64.powi(GRID_DECIMALS);
    let values = (0..=intervals as usize)
        .map(|i| round_to_grid(start + i as f64 * step, scale))
        .collect();
    ThresholdGrid::new(values)
}

/// Rounds `value` to the grid resolution. Magnitudes too large to scale are
/// already coarser than the resolution and are kept as is.
fn round_to_grid(value: f64, scale: f64) -> f64 {
    let scaled = value * scale;
    if scaled.is_finite() {
        scaled.round() / scale
    } else {
        value
    }
}

/// A finite, strictly increasing sequence of candidate thresholds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ThresholdGrid {
    values: Vec<f64>,
}

impl ThresholdGrid {
    /// Validates that every value is finite and strictly greater than the previous one.
    pub fn new(values: Vec<f64>) -> SicrResult<Self> {
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(SicrError::Config(format!("Grid contains a non-finite value: {}.", bad)));
        }
        if let Some(pair) = values.windows(2).find(|w| w[1] <= w[0]) {
            return Err(SicrError::Config(format!(
                "Grid must be strictly increasing, but {} is followed by {}.",
                pair[0], pair[1]
            )));
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl AsRef<[f64]> for ThresholdGrid {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

/// One grid per decision rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridsConfig {
    pub abs_diff: GridSpec,
    pub ratio: GridSpec,
}

impl Default for GridsConfig {
    fn default() -> Self {
        Self {
            abs_diff: GridSpec::range(0.005, 0.100, 0.005),
            ratio: GridSpec::range(1.0, 3.0, 0.1),
        }
    }
}

impl GridsConfig {
    pub fn spec_for(&self, kind: RuleKind) -> &GridSpec {
        match kind {
            RuleKind::AbsoluteDifference => &self.abs_diff,
            RuleKind::Ratio => &self.ratio,
        }
    }

    pub fn grid_for(&self, kind: RuleKind) -> SicrResult<ThresholdGrid> {
        self.spec_for(kind).build().map_err(|e| match e {
            SicrError::Config(msg) => SicrError::Config(format!("grid '{}': {}", kind, msg)),
            other => other,
        })
    }
}

/// Parameters of the synthetic portfolio source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of accounts to draw.
    pub accounts: usize,
    /// Seed for the generator's private RNG.
    pub seed: u64,
    /// Lower bound of the uniform origination measure.
    pub origination_min: f64,
    /// Upper bound of the uniform origination measure.
    pub origination_max: f64,
    /// Mean of the normal drift added to the origination measure.
    pub drift_mean: f64,
    pub drift_std: f64,
    /// Std dev of the zero-mean noise applied before labelling.
    pub label_noise_std: f64,
    /// An account is labelled SICR when drift plus noise exceeds this.
    pub label_cutoff: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            accounts: 1000,
            seed: 42,
            origination_min: 0.02,
            origination_max: 0.10,
            drift_mean: 0.03,
            drift_std: 0.01,
            label_noise_std: 0.005,
            label_cutoff: 0.04,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> SicrResult<()> {
        let mut errors = Vec::new();

        if self.accounts == 0 {
            errors.push("generator.accounts must be greater than 0.".to_string());
        }
        if !(self.origination_min > 0.0
            && self.origination_min <= self.origination_max
            && self.origination_max <= 1.0)
        {
            errors.push(format!(
                "generator origination range [{}, {}] must satisfy 0 < min <= max <= 1.",
                self.origination_min, self.origination_max
            ));
        }
        for (name, value) in [
            ("drift_std", self.drift_std),
            ("label_noise_std", self.label_noise_std),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!("generator.{} must be a non-negative number, got {}.", name, value));
            }
        }
        for (name, value) in [("drift_mean", self.drift_mean), ("label_cutoff", self.label_cutoff)] {
            if !value.is_finite() {
                errors.push(format!("generator.{} must be finite, got {}.", name, value));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SicrError::Config(format!(
                "Generator validation failed:\n{}",
                errors.join("\n")
            )))
        }
    }
}

/// Top-level configuration for a threshold comparison run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Evaluate thresholds on the rayon pool.
    pub parallel: bool,
    pub generator: GeneratorConfig,
    pub grids: GridsConfig,
}

impl SweepConfig {
    /// Loads a sweep configuration from a YAML file. Missing sections fall
    /// back to the reference values.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SicrResult<Self> {
        let path = path.as_ref();
        info!("Loading sweep configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: SweepConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Loads the reference configuration embedded in the crate.
    pub fn load_default() -> SicrResult<Self> {
        debug!("Loading default sweep configuration from embedded string...");
        let default_yaml = include_str!("../config/default_sweep.yaml");
        let config: SweepConfig = serde_yml::from_str(default_yaml)
            .context("Failed to parse default sweep configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Checks generator parameters and that both grids expand cleanly.
    pub fn validate(&self) -> SicrResult<()> {
        self.generator.validate()?;
        for kind in RuleKind::ALL {
            let grid = self.grids.grid_for(kind)?;
            debug!("Grid '{}' expands to {} thresholds.", kind, grid.len());
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> SicrResult<String> {
        serde_yml::to_string(self).map_err(|e| SicrError::Serialization(e.to_string()))
    }
}

/// Command-line level overrides applied on top of a loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct SweepOverrides {
    pub accounts: Option<usize>,
    pub seed: Option<u64>,
    pub parallel: Option<bool>,
}

/// Applies `overrides` to `config`, returning the merged configuration.
pub fn apply_overrides(mut config: SweepConfig, overrides: &SweepOverrides) -> SweepConfig {
    if let Some(accounts) = overrides.accounts {
        debug!("Overriding generator.accounts with user value: {}", accounts);
        config.generator.accounts = accounts;
    }
    if let Some(seed) = overrides.seed {
        debug!("Overriding generator.seed with user value: {}", seed);
        config.generator.seed = seed;
    }
    if let Some(parallel) = overrides.parallel {
        debug!("Overriding parallel with user value: {}", parallel);
        config.parallel = parallel;
    }
    config
}

/// Locations searched for a named scenario file `<name>.yaml`, in order.
pub fn scenario_candidate_paths(name: &str) -> Vec<PathBuf> {
    let file_name = format!("{}.yaml", name);
    [
        dirs::home_dir().map(|p| p.join(".sicr").join("scenarios")),
        dirs::config_dir().map(|p| p.join("sicr").join("scenarios")),
        Some(PathBuf::from("./config")),
    ]
    .into_iter()
    .flatten()
    .map(|dir| dir.join(&file_name))
    .collect()
}

/// Loads the first scenario file named `name` found on the search path.
pub fn load_scenario_by_name(name: &str) -> SicrResult<SweepConfig> {
    if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
        return Err(SicrError::Config(format!("Invalid scenario name '{}'.", name)));
    }

    let candidates = scenario_candidate_paths(name);
    match candidates.iter().find(|p| p.is_file()) {
        Some(path) => {
            debug!("Scenario '{}' resolved to {}", name, path.display());
            SweepConfig::load_from_file(path)
        }
        None => {
            let searched: Vec<String> = candidates.iter().map(|p| p.display().to_string()).collect();
            Err(SicrError::Config(format!(
                "Scenario '{}' not found. Searched: {}",
                name,
                searched.join(", ")
            )))
        }
    }
}
