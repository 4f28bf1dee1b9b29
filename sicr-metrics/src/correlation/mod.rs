use libm::sqrt;

use crate::confusion::ConfusionCounts;

/// Matthews Correlation Coefficient for a binary confusion matrix.
///
/// `(TP·TN − FP·FN) / sqrt((TP+FP)(TP+FN)(TN+FP)(TN+FN))`
///
/// When any of the four marginals is zero the denominator vanishes and the
/// coefficient is defined as exactly `0.0`. A predictor that never fires (or
/// always fires) therefore scores as uninformative instead of producing NaN.
pub fn matthews_correlation(counts: &ConfusionCounts) -> f64 {
    let marginals = [
        counts.predicted_positive(),
        counts.actual_positive(),
        counts.actual_negative(),
        counts.predicted_negative(),
    ];
    if marginals.contains(&0) {
        return 0.0;
    }

    let tp = counts.true_positives as f64;
    let tn = counts.true_negatives as f64;
    let fp = counts.false_positives as f64;
    let fn_ = counts.false_negatives as f64;

    let numerator = tp * tn - fp * fn_;
    let denominator = sqrt(marginals.iter().map(|&m| m as f64).product::<f64>());

    (numerator / denominator).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confusion::tally;

    const EPSILON: f64 = 1e-12;

    fn counts(tp: u64, tn: u64, fp: u64, fn_: u64) -> ConfusionCounts {
        ConfusionCounts {
            true_positives: tp,
            true_negatives: tn,
            false_positives: fp,
            false_negatives: fn_,
        }
    }

    #[test]
    fn test_mcc_perfect_prediction() {
        assert_eq!(matthews_correlation(&counts(5, 7, 0, 0)), 1.0);
    }

    #[test]
    fn test_mcc_inverted_prediction() {
        assert_eq!(matthews_correlation(&counts(0, 0, 6, 3)), -1.0);
    }

    #[test]
    fn test_mcc_known_value() {
        // TP=6 TN=3 FP=1 FN=2: (18 - 2) / sqrt(7 * 8 * 4 * 5) = 16 / sqrt(1120)
        let expected = 16.0 / sqrt(1120.0);
        assert!((matthews_correlation(&counts(6, 3, 1, 2)) - expected).abs() < EPSILON);
    }

    #[test]
    fn test_mcc_zero_marginal_is_zero() {
        // No positive truth labels at all.
        assert_eq!(matthews_correlation(&counts(0, 5, 3, 0)), 0.0);
        // Predictor never fires.
        assert_eq!(matthews_correlation(&counts(0, 5, 0, 4)), 0.0);
        // Predictor always fires.
        assert_eq!(matthews_correlation(&counts(4, 0, 5, 0)), 0.0);
    }

    #[test]
    fn test_mcc_all_negative_truth_never_errors() {
        let truth = [0, 0, 0, 0];
        let predicted = [1, 0, 1, 0];
        let c = tally(&truth, &predicted).unwrap();
        let mcc = matthews_correlation(&c);
        assert!(!mcc.is_nan());
        assert_eq!(mcc, 0.0);
    }

    #[test]
    fn test_mcc_stays_in_range() {
        for tp in 0..6u64 {
            for tn in 0..6u64 {
                for fp in 0..6u64 {
                    for fn_ in 0..6u64 {
                        let mcc = matthews_correlation(&counts(tp, tn, fp, fn_));
                        assert!((-1.0..=1.0).contains(&mcc), "out of range: {}", mcc);
                    }
                }
            }
        }
    }

    #[test]
    fn test_mcc_one_only_for_exact_match() {
        let truth = [1, 0, 1, 0, 0];
        let almost = [1, 0, 1, 0, 1];
        assert_eq!(matthews_correlation(&tally(&truth, &truth).unwrap()), 1.0);
        assert!(matthews_correlation(&tally(&truth, &almost).unwrap()) < 1.0);
    }
}
