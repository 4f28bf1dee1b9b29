// sicr-core/src/table.rs
//! Result aggregation and best-candidate selection.
//!
//! License: MIT OR APACHE 2.0

use serde::{Deserialize, Serialize};

use crate::rules::RuleKind;
use crate::sweep::EvaluationRow;

/// Picks the row with the highest MCC.
///
/// Ties go to the row that appears first, so for a single sweep the
/// earliest threshold in grid order wins. Returns `None` for an empty slice.
pub fn select_best(rows: &[EvaluationRow]) -> Option<&EvaluationRow> {
    select_best_of(rows.iter())
}

fn select_best_of<'a>(rows: impl Iterator<Item = &'a EvaluationRow>) -> Option<&'a EvaluationRow> {
    rows.fold(None, |best, row| match best {
        Some(current) if current.mcc >= row.mcc => Some(current),
        _ => Some(row),
    })
}

/// Ordered rows from one or more sweeps. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultTable {
    rows: Vec<EvaluationRow>,
}

impl From<Vec<EvaluationRow>> for ResultTable {
    fn from(rows: Vec<EvaluationRow>) -> Self {
        Self { rows }
    }
}

impl ResultTable {
    /// Concatenates tables, keeping each table's row order.
    pub fn concat<I>(tables: I) -> Self
    where
        I: IntoIterator<Item = ResultTable>,
    {
        Self {
            rows: tables.into_iter().flat_map(|t| t.rows).collect(),
        }
    }

    pub fn rows(&self) -> &[EvaluationRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first `n` rows (or all of them if there are fewer).
    pub fn head(&self, n: usize) -> &[EvaluationRow] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Rows ordered by MCC, highest first. The sort is stable, so equal
    /// scores keep their table order.
    pub fn sorted_by_mcc_desc(&self) -> Vec<EvaluationRow> {
        let mut sorted = self.rows.clone();
        sorted.sort_by(|a, b| b.mcc.total_cmp(&a.mcc));
        sorted
    }

    pub fn rows_for(&self, kind: RuleKind) -> impl Iterator<Item = &EvaluationRow> + '_ {
        self.rows.iter().filter(move |r| r.test_name == kind)
    }

    /// Best row across the whole table.
    pub fn best(&self) -> Option<&EvaluationRow> {
        select_best(&self.rows)
    }

    /// Best row among those produced by `kind`.
    pub fn best_for(&self, kind: RuleKind) -> Option<&EvaluationRow> {
        select_best_of(self.rows_for(kind))
    }

    /// One best row per rule, in the order the rules first appear.
    pub fn best_per_rule(&self) -> Vec<EvaluationRow> {
        let mut kinds: Vec<RuleKind> = Vec::new();
        for row in &self.rows {
            if !kinds.contains(&row.test_name) {
                kinds.push(row.test_name);
            }
        }
        kinds
            .into_iter()
            .filter_map(|kind| self.best_for(kind).copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(kind: RuleKind, threshold: f64, mcc: f64) -> EvaluationRow {
        EvaluationRow {
            test_name: kind,
            threshold,
            true_positives: 1,
            true_negatives: 1,
            false_positives: 0,
            false_negatives: 0,
            mcc,
        }
    }

    #[test]
    fn select_best_prefers_highest_mcc() {
        let rows = vec![
            row(RuleKind::AbsoluteDifference, 0.01, 0.2),
            row(RuleKind::AbsoluteDifference, 0.02, 0.7),
            row(RuleKind::AbsoluteDifference, 0.03, 0.5),
        ];
        assert_eq!(select_best(&rows).unwrap().threshold, 0.02);
    }

    #[test]
    fn select_best_breaks_ties_by_grid_order() {
        let rows = vec![
            row(RuleKind::Ratio, 1.0, 0.1),
            row(RuleKind::Ratio, 1.1, 0.6),
            row(RuleKind::Ratio, 1.2, 0.6),
            row(RuleKind::Ratio, 1.3, 0.6),
        ];
        assert_eq!(select_best(&rows).unwrap().threshold, 1.1);
    }

    #[test]
    fn select_best_of_empty_is_none() {
        assert!(select_best(&[]).is_none());
        assert!(ResultTable::default().best().is_none());
    }

    #[test]
    fn select_best_handles_all_negative_scores() {
        let rows = vec![
            row(RuleKind::Ratio, 1.0, -0.4),
            row(RuleKind::Ratio, 1.1, -0.2),
        ];
        assert_eq!(select_best(&rows).unwrap().threshold, 1.1);
    }

    #[test]
    fn concat_keeps_sweep_order() {
        let abs = ResultTable::from(vec![
            row(RuleKind::AbsoluteDifference, 0.01, 0.3),
            row(RuleKind::AbsoluteDifference, 0.02, 0.4),
        ]);
        let ratio = ResultTable::from(vec![row(RuleKind::Ratio, 1.5, 0.9)]);
        let table = ResultTable::concat([abs, ratio]);

        let order: Vec<(RuleKind, f64)> =
            table.rows().iter().map(|r| (r.test_name, r.threshold)).collect();
        assert_eq!(
            order,
            vec![
                (RuleKind::AbsoluteDifference, 0.01),
                (RuleKind::AbsoluteDifference, 0.02),
                (RuleKind::Ratio, 1.5)
            ]
        );
    }

    #[test]
    fn best_per_rule_selects_within_each_rule() {
        let table = ResultTable::from(vec![
            row(RuleKind::AbsoluteDifference, 0.01, 0.3),
            row(RuleKind::AbsoluteDifference, 0.02, 0.4),
            row(RuleKind::Ratio, 1.5, 0.9),
            row(RuleKind::Ratio, 1.6, 0.9),
        ]);
        let best = table.best_per_rule();
        assert_eq!(best.len(), 2);
        assert_eq!((best[0].test_name, best[0].threshold), (RuleKind::AbsoluteDifference, 0.02));
        assert_eq!((best[1].test_name, best[1].threshold), (RuleKind::Ratio, 1.5));
        assert_eq!(table.best().unwrap().threshold, 1.5);
    }

    #[test]
    fn head_and_sort() {
        let table = ResultTable::from(vec![
            row(RuleKind::Ratio, 1.0, 0.1),
            row(RuleKind::Ratio, 1.1, 0.8),
            row(RuleKind::Ratio, 1.2, 0.8),
            row(RuleKind::Ratio, 1.3, 0.5),
        ]);
        assert_eq!(table.head(2).len(), 2);
        assert_eq!(table.head(10).len(), 4);

        let sorted: Vec<f64> = table.sorted_by_mcc_desc().iter().map(|r| r.threshold).collect();
        assert_eq!(sorted, vec![1.1, 1.2, 1.3, 1.0]);
    }
}
