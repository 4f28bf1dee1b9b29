// sicr-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for running a full threshold comparison without a UI.
//!
//! A comparison runs the absolute-difference sweep and then the ratio sweep
//! over their configured grids, concatenates the rows into one table, and
//! records the best row per rule together with run metadata.

use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;
use uuid::Uuid;

use crate::config::SweepConfig;
use crate::dataset::Dataset;
use crate::errors::SicrResult;
use crate::rules::RuleKind;
use crate::sweep::{sweep, sweep_parallel, EvaluationRow};
use crate::synthetic::generate_portfolio;
use crate::table::ResultTable;

/// Provenance attached to every comparison report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunMetadata {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub engine_version: String,
    pub dataset_fingerprint: String,
    pub accounts: usize,
    pub positive_rate: f64,
    pub parallel: bool,
}

/// The outcome of comparing every rule over its grid.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub metadata: RunMetadata,
    /// Rows of every sweep, rule by rule, each in grid order.
    pub results: ResultTable,
    /// One best row per rule that had a non-empty grid.
    pub best: Vec<EvaluationRow>,
}

/// Runs both rule sweeps over `dataset` using the grids in `config`.
pub fn run_comparison(dataset: &Dataset, config: &SweepConfig) -> SicrResult<ComparisonReport> {
    let mut tables = Vec::with_capacity(RuleKind::ALL.len());

    for kind in RuleKind::ALL {
        let grid = config.grids.grid_for(kind)?;
        let rule = kind.rule();
        let rows = if config.parallel {
            sweep_parallel(dataset, rule.as_ref(), grid.values())?
        } else {
            sweep(dataset, rule.as_ref(), grid.values())?
        };
        tables.push(ResultTable::from(rows));
    }

    let results = ResultTable::concat(tables);
    let best = results.best_per_rule();
    for row in &best {
        info!(
            "Best threshold for '{}': {} (MCC {:.4})",
            row.test_name, row.threshold, row.mcc
        );
    }

    Ok(ComparisonReport {
        metadata: RunMetadata {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            dataset_fingerprint: dataset.fingerprint(),
            accounts: dataset.len(),
            positive_rate: dataset.positive_rate(),
            parallel: config.parallel,
        },
        results,
        best,
    })
}

/// Generates the synthetic portfolio described by `config` and compares
/// both rules on it.
pub fn run_synthetic_comparison(config: &SweepConfig) -> SicrResult<(Dataset, ComparisonReport)> {
    let dataset = generate_portfolio(&config.generator)?;
    let report = run_comparison(&dataset, config)?;
    Ok((dataset, report))
}
