use crate::error::{EvalError, LabelSource};
use crate::Label;

/// Agreement counts between a predicted and a true binary label sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionCounts {
    pub true_positives: u64,
    pub true_negatives: u64,
    pub false_positives: u64,
    pub false_negatives: u64,
}

impl ConfusionCounts {
    /// Number of observations tallied.
    pub fn total(&self) -> u64 {
        self.true_positives + self.true_negatives + self.false_positives + self.false_negatives
    }

    /// Observations predicted positive (TP + FP).
    pub fn predicted_positive(&self) -> u64 {
        self.true_positives + self.false_positives
    }

    /// Observations whose true label is positive (TP + FN).
    pub fn actual_positive(&self) -> u64 {
        self.true_positives + self.false_negatives
    }

    /// Observations whose true label is negative (TN + FP).
    pub fn actual_negative(&self) -> u64 {
        self.true_negatives + self.false_positives
    }

    /// Observations predicted negative (TN + FN).
    pub fn predicted_negative(&self) -> u64 {
        self.true_negatives + self.false_negatives
    }

    pub fn precision(&self) -> f64 {
        ratio(self.true_positives, self.predicted_positive())
    }

    pub fn recall(&self) -> f64 {
        ratio(self.true_positives, self.actual_positive())
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.true_positives + self.true_negatives, self.total())
    }

    fn record(&mut self, truth: bool, predicted: bool) {
        match (truth, predicted) {
            (true, true) => self.true_positives += 1,
            (false, false) => self.true_negatives += 1,
            (false, true) => self.false_positives += 1,
            (true, false) => self.false_negatives += 1,
        }
    }
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn as_bit(value: Label, source: LabelSource, index: usize) -> Result<bool, EvalError> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(EvalError::InvalidLabel { source, index, value }),
    }
}

/// Tallies TP/TN/FP/FN for two equal-length `{0, 1}` sequences.
///
/// The four counts are mutually exclusive, so `total()` always equals the
/// input length.
pub fn tally(true_labels: &[Label], predicted: &[Label]) -> Result<ConfusionCounts, EvalError> {
    if true_labels.len() != predicted.len() {
        return Err(EvalError::LengthMismatch {
            truth: true_labels.len(),
            predicted: predicted.len(),
        });
    }
    if true_labels.is_empty() {
        return Err(EvalError::Empty);
    }

    let mut counts = ConfusionCounts::default();
    for (index, (&truth, &guess)) in true_labels.iter().zip(predicted).enumerate() {
        let truth = as_bit(truth, LabelSource::Truth, index)?;
        let guess = as_bit(guess, LabelSource::Prediction, index)?;
        counts.record(truth, guess);
    }
    Ok(counts)
}
