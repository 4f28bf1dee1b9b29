// sicr-metrics/src/lib.rs
//! Binary classification scoring primitives.
//!
//! The crate is `no_std` and allocation-free on the hot path: it tallies a
//! confusion matrix from two label slices and derives the Matthews
//! Correlation Coefficient from it. Everything here is pure and deterministic.
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod confusion;
pub mod correlation;
pub mod error;
pub mod statistics;

pub use confusion::{tally, ConfusionCounts};
pub use correlation::matthews_correlation;
pub use error::{EvalError, LabelSource};

/// Common type definitions
pub type Label = u8;

/// The outcome of scoring one predicted label sequence against the truth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub counts: ConfusionCounts,
    /// Matthews correlation, exactly `0.0` when any marginal is empty.
    pub mcc: f64,
}

/// Scores `predicted` against `true_labels`.
///
/// Both slices must be non-empty, of equal length, and contain only `0` and
/// `1`. Out-of-range labels are reported, never coerced.
pub fn evaluate(true_labels: &[Label], predicted: &[Label]) -> Result<Evaluation, EvalError> {
    let counts = tally(true_labels, predicted)?;
    Ok(Evaluation {
        counts,
        mcc: matthews_correlation(&counts),
    })
}
