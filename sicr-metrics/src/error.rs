// sicr-metrics/src/error.rs
use core::fmt;

/// Which of the two label sequences an invalid value was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSource {
    Truth,
    Prediction,
}

impl fmt::Display for LabelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelSource::Truth => write!(f, "true labels"),
            LabelSource::Prediction => write!(f, "predicted labels"),
        }
    }
}

/// Caller errors detected while tallying a confusion matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalError {
    /// No labels were supplied.
    Empty,
    /// The two sequences differ in length.
    LengthMismatch { truth: usize, predicted: usize },
    /// A label outside `{0, 1}`.
    InvalidLabel {
        source: LabelSource,
        index: usize,
        value: u8,
    },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::Empty => write!(f, "label sequences must not be empty"),
            EvalError::LengthMismatch { truth, predicted } => write!(
                f,
                "label sequences differ in length: {} true labels vs {} predictions",
                truth, predicted
            ),
            EvalError::InvalidLabel { source, index, value } => write!(
                f,
                "{} contain value {} at index {}; only 0 and 1 are allowed",
                source, value, index
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EvalError {}
