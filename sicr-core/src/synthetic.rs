// sicr-core/src/synthetic.rs
//! Deterministic synthetic portfolio source.
//!
//! The generator owns its own seeded `StdRng`; nothing in the sweep engine
//! holds random state. Given the same [`GeneratorConfig`] it always produces
//! the identical dataset.
//!
//! License: MIT OR Apache-2.0

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::config::GeneratorConfig;
use crate::dataset::{AccountRecord, Dataset};
use crate::errors::{SicrError, SicrResult};

/// Draws account records for a simulated loan portfolio.
///
/// * origination measure: uniform over `[origination_min, origination_max]`
/// * current measure: origination plus normal drift, clipped to `[0, 1]`
/// * label: `1` when `current − origination + noise > label_cutoff`
#[derive(Debug)]
pub struct PortfolioGenerator {
    rng: StdRng,
    config: GeneratorConfig,
    drift: Normal<f64>,
    label_noise: Normal<f64>,
}

impl PortfolioGenerator {
    pub fn new(config: GeneratorConfig) -> SicrResult<Self> {
        config.validate()?;
        let drift = Normal::new(config.drift_mean, config.drift_std)
            .map_err(|e| SicrError::Config(format!("generator drift distribution: {}", e)))?;
        let label_noise = Normal::new(0.0, config.label_noise_std)
            .map_err(|e| SicrError::Config(format!("generator label noise distribution: {}", e)))?;

        debug!("Initializing PortfolioGenerator with seed: {}", config.seed);
        Ok(Self {
            rng: StdRng::seed_from_u64(config.seed),
            config,
            drift,
            label_noise,
        })
    }

    fn next_record(&mut self, index: usize) -> AccountRecord {
        let origination = self
            .rng
            .random_range(self.config.origination_min..=self.config.origination_max);
        let current = (origination + self.drift.sample(&mut self.rng)).clamp(0.0, 1.0);
        let noise = self.label_noise.sample(&mut self.rng);
        let label = u8::from(current - origination + noise > self.config.label_cutoff);

        AccountRecord::new(format!("ACC{:05}", index), origination, current, label)
    }

    /// Draws `config.accounts` records and validates them into a dataset.
    pub fn generate(&mut self) -> SicrResult<Dataset> {
        let records: Vec<AccountRecord> =
            (0..self.config.accounts).map(|i| self.next_record(i)).collect();
        let dataset = Dataset::new(records)?;
        info!(
            "Generated {} synthetic accounts (seed {}, positive rate {:.3}).",
            dataset.len(),
            self.config.seed,
            dataset.positive_rate()
        );
        Ok(dataset)
    }
}

/// One-shot helper: builds a generator from `config` and draws a dataset.
pub fn generate_portfolio(config: &GeneratorConfig) -> SicrResult<Dataset> {
    PortfolioGenerator::new(config.clone())?.generate()
}
