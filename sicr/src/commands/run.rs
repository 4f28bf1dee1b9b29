//! `sicr run`: sweep both rules and report the results.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use sicr_core::{
    run_comparison, run_synthetic_comparison, ComparisonReport, Dataset, EvaluationRow,
    ResultTable, SweepOverrides,
};

use crate::cli::{RunCommand, SortOrder};
use crate::commands::{info_msg, resolve_config, success_msg, warn_msg};
use crate::ui::report;
use crate::ui::theme::ThemeMap;

/// How the finished report is emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportTarget {
    Tables,
    JsonStdout,
    JsonFile(PathBuf),
}

/// Presentation options for a run, independent of clap.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub top: Option<usize>,
    pub sort: SortOrder,
    pub target: ReportTarget,
}

impl RunOptions {
    pub fn from_command(cmd: &RunCommand) -> Self {
        let target = if cmd.json_stdout {
            ReportTarget::JsonStdout
        } else if let Some(path) = &cmd.json_file {
            ReportTarget::JsonFile(path.clone())
        } else {
            ReportTarget::Tables
        };
        Self { top: cmd.top, sort: cmd.sort, target }
    }
}

/// Entry point for the `run` subcommand.
pub fn run_command(cmd: &RunCommand, theme: &ThemeMap, quiet: bool) -> Result<()> {
    let overrides = SweepOverrides {
        accounts: cmd.generator.accounts,
        seed: cmd.generator.seed,
        parallel: cmd.parallel.then_some(true),
    };
    let config = resolve_config(&cmd.source, &overrides)?;
    let opts = RunOptions::from_command(cmd);

    let (dataset, report) = match &cmd.input {
        Some(path) => {
            if cmd.generator.accounts.is_some() || cmd.generator.seed.is_some() {
                warn_msg("--accounts and --seed are ignored when --input is given.", theme);
            }
            let dataset = Dataset::load_from_file(path)
                .with_context(|| format!("Failed to load dataset '{}'", path.display()))?;
            let report = run_comparison(&dataset, &config).context("Threshold comparison failed")?;
            (dataset, report)
        }
        None => {
            if !quiet {
                info_msg(
                    format!(
                        "Generating {} synthetic accounts (seed {}).",
                        config.generator.accounts, config.generator.seed
                    ),
                    theme,
                );
            }
            run_synthetic_comparison(&config).context("Threshold comparison failed")?
        }
    };

    let stdout = io::stdout();
    let supports_color = stdout.is_terminal();
    let mut handle = stdout.lock();
    emit_report(&mut handle, &dataset, &report, &opts, theme, supports_color)?;
    handle.flush()?;

    if let ReportTarget::JsonFile(path) = &opts.target {
        if !quiet {
            success_msg(format!("Report written to {}", path.display()), theme);
        }
    }
    Ok(())
}

/// Rows of the printed result table after sorting and truncation.
pub fn visible_rows(report: &ComparisonReport, sort: SortOrder, top: Option<usize>) -> Vec<EvaluationRow> {
    let ordered = match sort {
        SortOrder::Grid => report.results.clone(),
        SortOrder::Mcc => ResultTable::from(report.results.sorted_by_mcc_desc()),
    };
    match top {
        Some(n) => ordered.head(n).to_vec(),
        None => ordered.rows().to_vec(),
    }
}

/// Writes `report` according to `opts.target`.
pub fn emit_report<W: Write>(
    writer: &mut W,
    dataset: &Dataset,
    report: &ComparisonReport,
    opts: &RunOptions,
    theme: &ThemeMap,
    supports_color: bool,
) -> Result<()> {
    match &opts.target {
        ReportTarget::JsonStdout => {
            serde_json::to_writer_pretty(&mut *writer, report).context("Failed to serialize report")?;
            writeln!(writer)?;
        }
        ReportTarget::JsonFile(path) => {
            let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
            fs::write(path, json)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!("Wrote {} rows to {}", report.results.len(), path.display());
        }
        ReportTarget::Tables => {
            debug!("Rendering {} result rows as tables.", report.results.len());
            let rows = visible_rows(report, opts.sort, opts.top);
            report::print_dataset_summary(writer, dataset, theme, supports_color)?;
            let title = match opts.sort {
                SortOrder::Grid => "Threshold sweep results",
                SortOrder::Mcc => "Threshold sweep results (by MCC)",
            };
            report::print_results(writer, title, &rows, report.results.len(), theme, supports_color)?;
            report::print_best(writer, &report.best, report.results.best(), theme, supports_color)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeStyle;
    use sicr_core::{AccountRecord, RuleKind, SweepConfig};

    fn reference_report() -> (Dataset, ComparisonReport) {
        let dataset = Dataset::new(vec![
            AccountRecord::new("A", 0.05, 0.05, 0),
            AccountRecord::new("B", 0.05, 0.10, 1),
            AccountRecord::new("C", 0.03, 0.031, 0),
            AccountRecord::new("D", 0.02, 0.09, 1),
        ])
        .unwrap();
        let report = run_comparison(&dataset, &SweepConfig::default()).unwrap();
        (dataset, report)
    }

    fn options(sort: SortOrder, top: Option<usize>, target: ReportTarget) -> RunOptions {
        RunOptions { top, sort, target }
    }

    #[test]
    fn grid_order_keeps_abs_diff_first() {
        let (_, report) = reference_report();
        let rows = visible_rows(&report, SortOrder::Grid, Some(3));
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.test_name == RuleKind::AbsoluteDifference));
        assert_eq!(rows[0].threshold, 0.005);
    }

    #[test]
    fn mcc_order_is_descending() {
        let (_, report) = reference_report();
        let rows = visible_rows(&report, SortOrder::Mcc, None);
        assert_eq!(rows.len(), report.results.len());
        assert!(rows.windows(2).all(|w| w[0].mcc >= w[1].mcc));
    }

    #[test]
    fn json_stdout_is_parseable() {
        let (dataset, report) = reference_report();
        let theme = ThemeStyle::default_theme_map();
        let mut buf = Vec::new();
        emit_report(&mut buf, &dataset, &report, &options(SortOrder::Grid, None, ReportTarget::JsonStdout), &theme, false)
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["results"].as_array().unwrap().len(), 41);
        assert_eq!(value["best"].as_array().unwrap().len(), 2);
        assert_eq!(value["results"][0]["test_name"], "abs_diff");
    }

    #[test]
    fn json_file_target_writes_report() {
        let (dataset, report) = reference_report();
        let theme = ThemeStyle::default_theme_map();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let mut buf = Vec::new();
        emit_report(
            &mut buf,
            &dataset,
            &report,
            &options(SortOrder::Grid, None, ReportTarget::JsonFile(path.clone())),
            &theme,
            false,
        )
        .unwrap();

        assert!(buf.is_empty());
        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["metadata"]["accounts"], 4);
    }

    #[test]
    fn tables_include_best_section() {
        let (dataset, report) = reference_report();
        let theme = ThemeStyle::default_theme_map();
        let mut buf = Vec::new();
        emit_report(&mut buf, &dataset, &report, &options(SortOrder::Grid, Some(5), ReportTarget::Tables), &theme, false)
            .unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("Best threshold per rule"));
        assert!(out.contains("(5 of 41 rows shown)"));
        assert!(out.contains("ratio"));
        assert!(out.contains("Overall best:"));
    }

    #[test]
    fn mcc_order_with_top_takes_highest_rows() {
        let (_, report) = reference_report();
        let rows = visible_rows(&report, SortOrder::Mcc, Some(2));
        assert_eq!(rows.len(), 2);
        let best = report.results.best().unwrap();
        assert_eq!(rows[0], *best);
    }
}
