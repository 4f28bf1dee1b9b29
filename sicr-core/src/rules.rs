// sicr-core/src/rules.rs
//! Decision rules that turn a dataset and a threshold into predicted labels.
//!
//! The `DecisionRule` trait decouples the sweep engine from the specific
//! comparison being made. Two concrete rules exist, one per [`RuleKind`]:
//! an absolute-difference rule and a ratio rule over the current and
//! origination risk measures.
//!
//! License: MIT OR APACHE 2.0

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::dataset::Dataset;
use crate::errors::{SicrError, SicrResult};

/// Closed set of rule identifiers, used as the `test_name` of result rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RuleKind {
    #[serde(rename = "abs_diff")]
    AbsoluteDifference,
    #[serde(rename = "ratio")]
    Ratio,
}

impl RuleKind {
    /// Every rule, in the order comparisons are run.
    pub const ALL: [RuleKind; 2] = [RuleKind::AbsoluteDifference, RuleKind::Ratio];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::AbsoluteDifference => "abs_diff",
            RuleKind::Ratio => "ratio",
        }
    }

    /// Returns the concrete rule implementing this kind.
    pub fn rule(&self) -> Box<dyn DecisionRule> {
        match self {
            RuleKind::AbsoluteDifference => Box::new(AbsoluteDifferenceRule),
            RuleKind::Ratio => Box::new(RatioRule),
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleKind {
    type Err = SicrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "abs_diff" => Ok(RuleKind::AbsoluteDifference),
            "ratio" => Ok(RuleKind::Ratio),
            other => Err(SicrError::InvalidInput(format!(
                "Unknown rule '{}'; expected 'abs_diff' or 'ratio'.",
                other
            ))),
        }
    }
}

/// A pure mapping `(dataset, threshold) -> predicted labels`.
///
/// Implementations must return exactly one label in `{0, 1}` per account,
/// in dataset order, and must not hold mutable state.
pub trait DecisionRule: Send + Sync {
    /// The identifier reported in result rows.
    fn kind(&self) -> RuleKind;

    /// Checks that the rule is defined for every account in `dataset`.
    ///
    /// The sweep engine calls this once before evaluating any threshold.
    fn validate(&self, _dataset: &Dataset) -> SicrResult<()> {
        Ok(())
    }

    /// Flags each account as `1` (SICR) or `0` at the given threshold.
    fn predict(&self, dataset: &Dataset, threshold: f64) -> SicrResult<Vec<u8>>;
}

/// Flags an account when `current − origination >= threshold`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbsoluteDifferenceRule;

impl DecisionRule for AbsoluteDifferenceRule {
    fn kind(&self) -> RuleKind {
        RuleKind::AbsoluteDifference
    }

    fn predict(&self, dataset: &Dataset, threshold: f64) -> SicrResult<Vec<u8>> {
        Ok(dataset
            .records()
            .iter()
            .map(|r| u8::from(r.current_measure - r.origination_measure >= threshold))
            .collect())
    }
}

/// Flags an account when `current / origination >= threshold`.
///
/// Undefined for a non-positive origination measure; such accounts are
/// rejected with [`SicrError::DivisionByZero`] instead of producing an
/// infinite or NaN ratio.
#[derive(Debug, Clone, Copy, Default)]
pub struct RatioRule;

impl DecisionRule for RatioRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Ratio
    }

    fn validate(&self, dataset: &Dataset) -> SicrResult<()> {
        match dataset.records().iter().find(|r| r.origination_measure <= 0.0) {
            Some(record) => Err(SicrError::DivisionByZero { account_id: record.id.clone() }),
            None => Ok(()),
        }
    }

    fn predict(&self, dataset: &Dataset, threshold: f64) -> SicrResult<Vec<u8>> {
        dataset
            .records()
            .iter()
            .map(|r| {
                if r.origination_measure <= 0.0 {
                    return Err(SicrError::DivisionByZero { account_id: r.id.clone() });
                }
                Ok(u8::from(r.current_measure / r.origination_measure >= threshold))
            })
            .collect()
    }
}
