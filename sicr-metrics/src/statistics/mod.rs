use libm::sqrt;

/// Distribution summary for a numeric column (e.g. a risk measure).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStats {
    pub count: usize,
    /// The arithmetic mean of the values.
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Calculates count, mean, population standard deviation and range.
///
/// An empty slice yields an all-zero summary.
pub fn summarize(values: &[f64]) -> SummaryStats {
    if values.is_empty() {
        return SummaryStats { count: 0, mean: 0.0, std_dev: 0.0, min: 0.0, max: 0.0 };
    }

    let len = values.len() as f64;
    let mean = values.iter().sum::<f64>() / len;

    let variance = values
        .iter()
        .map(|value| {
            let diff = mean - value;
            diff * diff
        })
        .sum::<f64>()
        / len;

    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    SummaryStats {
        count: values.len(),
        mean,
        std_dev: sqrt(variance),
        min,
        max,
    }
}
