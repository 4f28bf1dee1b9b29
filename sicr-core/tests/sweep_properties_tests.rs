// sicr-core/tests/sweep_properties_tests.rs
use sicr_core::{
    evaluate, generate_portfolio, select_best, sweep, sweep_parallel, AbsoluteDifferenceRule,
    AccountRecord, Dataset, GeneratorConfig, GridsConfig, RatioRule, RuleKind, SicrError,
};

fn reference_dataset() -> Dataset {
    Dataset::new(vec![
        AccountRecord::new("A", 0.05, 0.05, 0),
        AccountRecord::new("B", 0.05, 0.10, 1),
        AccountRecord::new("C", 0.03, 0.031, 0),
        AccountRecord::new("D", 0.02, 0.09, 1),
    ])
    .unwrap()
}

fn synthetic(accounts: usize, seed: u64) -> Dataset {
    generate_portfolio(&GeneratorConfig { accounts, seed, ..GeneratorConfig::default() }).unwrap()
}

#[test_log::test]
fn concrete_scenario_abs_diff_at_004() {
    let rows = sweep(&reference_dataset(), &AbsoluteDifferenceRule, &[0.04]).unwrap();
    let row = rows[0];
    assert_eq!(row.true_positives, 2);
    assert_eq!(row.true_negatives, 2);
    assert_eq!(row.false_positives, 0);
    assert_eq!(row.false_negatives, 0);
    assert_eq!(row.mcc, 1.0);
}

#[test_log::test]
fn exhaustiveness_and_range_on_reference_grids() {
    let dataset = synthetic(500, 3);
    let grids = GridsConfig::default();
    for kind in RuleKind::ALL {
        let grid = grids.grid_for(kind).unwrap();
        let rule = kind.rule();
        for row in sweep(&dataset, rule.as_ref(), grid.values()).unwrap() {
            assert_eq!(row.counts().total(), 500);
            assert!((-1.0..=1.0).contains(&row.mcc));
            assert_eq!(row.test_name, kind);
        }
    }
}

#[test]
fn order_preserved_for_unsorted_grid_in_parallel() {
    let dataset = synthetic(400, 11);
    let grid = [0.09, 0.01, 0.05, 0.03, 0.07, 0.02];
    let rows = sweep_parallel(&dataset, &AbsoluteDifferenceRule, &grid).unwrap();
    let seen: Vec<f64> = rows.iter().map(|r| r.threshold).collect();
    assert_eq!(seen, grid.to_vec());
}

#[test]
fn monotonic_flag_count_for_abs_diff() {
    let dataset = synthetic(300, 5);
    let grid = GridsConfig::default().grid_for(RuleKind::AbsoluteDifference).unwrap();
    let rows = sweep(&dataset, &AbsoluteDifferenceRule, grid.values()).unwrap();
    for pair in rows.windows(2) {
        assert!(pair[1].flagged() <= pair[0].flagged());
    }
}

#[test]
fn degenerate_all_negative_labels() {
    let dataset = Dataset::new(vec![
        AccountRecord::new("A", 0.02, 0.09, 0),
        AccountRecord::new("B", 0.05, 0.06, 0),
    ])
    .unwrap();
    for rule_rows in [
        sweep(&dataset, &AbsoluteDifferenceRule, &[0.0, 0.01, 0.5]).unwrap(),
        sweep(&dataset, &RatioRule, &[1.0, 1.1, 5.0]).unwrap(),
    ] {
        for row in rule_rows {
            assert_eq!(row.mcc, 0.0);
        }
    }
}

#[test]
fn tie_break_returns_earlier_threshold() {
    // 0.02 and 0.04 both separate the reference dataset perfectly.
    let rows = sweep(&reference_dataset(), &AbsoluteDifferenceRule, &[0.0, 0.02, 0.04, 0.06]).unwrap();
    assert_eq!(rows[1].mcc, rows[2].mcc);
    assert_eq!(select_best(&rows).unwrap().threshold, 0.02);
}

#[test]
fn perfect_match_requires_both_classes() {
    let both = evaluate(&[1, 0, 1], &[1, 0, 1]).unwrap();
    assert_eq!(both.mcc, 1.0);
    let single_class = evaluate(&[1, 1, 1], &[1, 1, 1]).unwrap();
    assert_eq!(single_class.mcc, 0.0);
}

#[test]
fn evaluator_rejects_mismatched_and_invalid_labels() {
    assert!(evaluate(&[0, 1, 1], &[0, 1]).is_err());
    assert!(evaluate(&[0, 1], &[0, 5]).is_err());
    let err: SicrError = evaluate(&[0, 1], &[0, 5]).unwrap_err().into();
    assert!(matches!(err, SicrError::InvalidInput(_)));
}

#[test]
fn ratio_rule_rejects_zero_origination() {
    let dataset = Dataset::new(vec![
        AccountRecord::new("A", 0.05, 0.06, 0),
        AccountRecord::new("B", 0.0, 0.06, 1),
    ])
    .unwrap();
    let err = sweep(&dataset, &RatioRule, &[1.0]).unwrap_err();
    assert!(matches!(err, SicrError::DivisionByZero { ref account_id } if account_id == "B"));
}

#[test]
fn sweep_is_deterministic_across_runs() {
    let a = sweep(&synthetic(200, 1), &RatioRule, &[1.2, 1.5, 2.0]).unwrap();
    let b = sweep(&synthetic(200, 1), &RatioRule, &[1.2, 1.5, 2.0]).unwrap();
    assert_eq!(a, b);
}
