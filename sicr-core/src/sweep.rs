// sicr-core/src/sweep.rs
//! The threshold sweep engine.
//!
//! A sweep applies one [`DecisionRule`] at every threshold of a grid, scores
//! each prediction against the dataset's ground truth with
//! [`sicr_metrics::evaluate`], and returns one [`EvaluationRow`] per
//! threshold in grid order. Thresholds are independent of each other, so
//! [`sweep_parallel`] may evaluate them on the rayon pool; indexed collection
//! puts the rows back in grid order before they are returned.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sicr_metrics::{ConfusionCounts, Evaluation};

use crate::dataset::Dataset;
use crate::errors::{SicrError, SicrResult};
use crate::rules::{DecisionRule, RuleKind};

/// Score of one `(rule, threshold)` candidate. Immutable once produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRow {
    pub test_name: RuleKind,
    pub threshold: f64,
    #[serde(rename = "tp")]
    pub true_positives: u64,
    #[serde(rename = "tn")]
    pub true_negatives: u64,
    #[serde(rename = "fp")]
    pub false_positives: u64,
    #[serde(rename = "fn")]
    pub false_negatives: u64,
    pub mcc: f64,
}

impl EvaluationRow {
    pub fn new(test_name: RuleKind, threshold: f64, evaluation: &Evaluation) -> Self {
        let counts = evaluation.counts;
        Self {
            test_name,
            threshold,
            true_positives: counts.true_positives,
            true_negatives: counts.true_negatives,
            false_positives: counts.false_positives,
            false_negatives: counts.false_negatives,
            mcc: evaluation.mcc,
        }
    }

    /// The row reported for an empty dataset: all counts zero, MCC zero.
    pub fn degenerate(test_name: RuleKind, threshold: f64) -> Self {
        Self::new(
            test_name,
            threshold,
            &Evaluation { counts: ConfusionCounts::default(), mcc: 0.0 },
        )
    }

    pub fn counts(&self) -> ConfusionCounts {
        ConfusionCounts {
            true_positives: self.true_positives,
            true_negatives: self.true_negatives,
            false_positives: self.false_positives,
            false_negatives: self.false_negatives,
        }
    }

    /// Number of accounts the rule flagged at this threshold.
    pub fn flagged(&self) -> u64 {
        self.true_positives + self.false_positives
    }
}

/// Evaluates `rule` at every threshold, returning rows in grid order.
///
/// An empty grid yields an empty vector. An empty dataset yields one
/// degenerate row (MCC 0) per threshold.
pub fn sweep(
    dataset: &Dataset,
    rule: &dyn DecisionRule,
    thresholds: &[f64],
) -> SicrResult<Vec<EvaluationRow>> {
    let truth = prepare(dataset, rule, thresholds)?;
    thresholds
        .iter()
        .map(|&threshold| evaluate_threshold(dataset, rule, &truth, threshold))
        .collect()
}

/// Same contract as [`sweep`], with thresholds evaluated on the rayon pool.
pub fn sweep_parallel(
    dataset: &Dataset,
    rule: &dyn DecisionRule,
    thresholds: &[f64],
) -> SicrResult<Vec<EvaluationRow>> {
    let truth = prepare(dataset, rule, thresholds)?;
    thresholds
        .par_iter()
        .map(|&threshold| evaluate_threshold(dataset, rule, &truth, threshold))
        .collect()
}

fn prepare(dataset: &Dataset, rule: &dyn DecisionRule, thresholds: &[f64]) -> SicrResult<Vec<u8>> {
    rule.validate(dataset)?;

    if let Some(bad) = thresholds.iter().find(|t| !t.is_finite()) {
        return Err(SicrError::InvalidInput(format!(
            "Threshold grid for rule '{}' contains a non-finite value: {}",
            rule.kind(),
            bad
        )));
    }

    if thresholds.is_empty() {
        warn!("Empty threshold grid for rule '{}'; nothing to evaluate.", rule.kind());
    } else {
        info!(
            "Sweeping {} thresholds for rule '{}' over {} accounts.",
            thresholds.len(),
            rule.kind(),
            dataset.len()
        );
    }

    Ok(dataset.true_labels())
}

fn evaluate_threshold(
    dataset: &Dataset,
    rule: &dyn DecisionRule,
    truth: &[u8],
    threshold: f64,
) -> SicrResult<EvaluationRow> {
    if dataset.is_empty() {
        return Ok(EvaluationRow::degenerate(rule.kind(), threshold));
    }

    let predicted = rule.predict(dataset, threshold)?;
    let evaluation = sicr_metrics::evaluate(truth, &predicted)?;
    debug!(
        "rule={} threshold={} tp={} tn={} fp={} fn={} mcc={:.6}",
        rule.kind(),
        threshold,
        evaluation.counts.true_positives,
        evaluation.counts.true_negatives,
        evaluation.counts.false_positives,
        evaluation.counts.false_negatives,
        evaluation.mcc
    );

    Ok(EvaluationRow::new(rule.kind(), threshold, &evaluation))
}
