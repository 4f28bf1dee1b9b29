//! Table rendering for datasets, sweep results and best thresholds.
//!
//! Every function takes the writer explicitly so the same code serves the
//! terminal and tests.

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use std::io::{self, Write};

use sicr_core::{Dataset, EvaluationRow, RuleKind, ThresholdGrid};
use sicr_metrics::statistics::summarize;

use crate::ui::output_format::paint;
use crate::ui::theme::{entry_color, ThemeEntry, ThemeMap};

const MCC_HIGH: f64 = 0.5;

const RESULT_COLUMNS: [&str; 10] = [
    "test_name",
    "threshold",
    "TP",
    "TN",
    "FP",
    "FN",
    "precision",
    "recall",
    "accuracy",
    "MCC",
];

fn new_table(headers: &[&str], theme: &ThemeMap, supports_color: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
    if supports_color {
        table.enforce_styling();
    } else {
        table.force_no_tty();
    }
    table.set_header(
        headers
            .iter()
            .map(|h| themed_cell(h.to_string(), ThemeEntry::TableHeader, theme, supports_color)),
    );
    table
}

fn themed_cell(text: String, entry: ThemeEntry, theme: &ThemeMap, supports_color: bool) -> Cell {
    let cell = Cell::new(text);
    match entry_color(theme, entry) {
        Some(color) if supports_color => cell.fg(color.to_table_color()),
        _ => cell,
    }
}

fn number_cell(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

fn mcc_entry(mcc: f64) -> Option<ThemeEntry> {
    if mcc >= MCC_HIGH {
        Some(ThemeEntry::MccHigh)
    } else if mcc <= 0.0 {
        Some(ThemeEntry::MccLow)
    } else {
        None
    }
}

/// Formats a threshold for display; absolute-difference grids need more precision.
pub fn format_threshold(kind: RuleKind, threshold: f64) -> String {
    match kind {
        RuleKind::AbsoluteDifference => format!("{:.3}", threshold),
        RuleKind::Ratio => format!("{:.2}", threshold),
    }
}

fn result_row(
    row: &EvaluationRow,
    row_entry: Option<ThemeEntry>,
    theme: &ThemeMap,
    supports_color: bool,
) -> Vec<Cell> {
    let name_entry = row_entry.unwrap_or(ThemeEntry::RuleName);
    let counts = row.counts();
    let mut mcc_cell = number_cell(format!("{:.4}", row.mcc));
    if let Some(entry) = row_entry.or_else(|| mcc_entry(row.mcc)) {
        if let (Some(color), true) = (entry_color(theme, entry), supports_color) {
            mcc_cell = mcc_cell.fg(color.to_table_color());
        }
    }

    vec![
        themed_cell(row.test_name.to_string(), name_entry, theme, supports_color),
        number_cell(format_threshold(row.test_name, row.threshold)),
        number_cell(row.true_positives.to_string()),
        number_cell(row.true_negatives.to_string()),
        number_cell(row.false_positives.to_string()),
        number_cell(row.false_negatives.to_string()),
        number_cell(format!("{:.4}", counts.precision())),
        number_cell(format!("{:.4}", counts.recall())),
        number_cell(format!("{:.4}", counts.accuracy())),
        mcc_cell,
    ]
}

/// Builds the result table for `rows`, in the order given.
pub fn build_results_table(rows: &[EvaluationRow], theme: &ThemeMap, supports_color: bool) -> Table {
    let mut table = new_table(&RESULT_COLUMNS, theme, supports_color);
    for row in rows {
        table.add_row(result_row(row, None, theme, supports_color));
    }
    table
}

/// Builds the one-row-per-rule table of best thresholds.
pub fn build_best_table(best: &[EvaluationRow], theme: &ThemeMap, supports_color: bool) -> Table {
    let mut table = new_table(&RESULT_COLUMNS, theme, supports_color);
    for row in best {
        table.add_row(result_row(row, Some(ThemeEntry::BestRow), theme, supports_color));
    }
    table
}

fn print_header<W: Write>(writer: &mut W, title: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", paint(title, ThemeEntry::Header, theme, supports_color))
}

/// Prints account count, label balance and the distribution of both measures.
pub fn print_dataset_summary<W: Write>(
    writer: &mut W,
    dataset: &Dataset,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    print_header(writer, "Portfolio", theme, supports_color)?;
    writeln!(
        writer,
        "{} accounts, positive rate {:.2}%, fingerprint {}",
        dataset.len(),
        dataset.positive_rate() * 100.0,
        &dataset.fingerprint()[..12]
    )?;

    let mut table = new_table(&["measure", "mean", "std", "min", "max"], theme, supports_color);
    for (name, values) in [
        ("origination_measure", dataset.origination_measures()),
        ("current_measure", dataset.current_measures()),
    ] {
        let stats = summarize(&values);
        table.add_row(vec![
            Cell::new(name),
            number_cell(format!("{:.4}", stats.mean)),
            number_cell(format!("{:.4}", stats.std_dev)),
            number_cell(format!("{:.4}", stats.min)),
            number_cell(format!("{:.4}", stats.max)),
        ]);
    }
    writeln!(writer, "{table}")
}

/// Prints `rows` under `title`, noting how many rows were left out.
pub fn print_results<W: Write>(
    writer: &mut W,
    title: &str,
    rows: &[EvaluationRow],
    total: usize,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    print_header(writer, title, theme, supports_color)?;
    if total == 0 {
        return writeln!(writer, "No thresholds evaluated.");
    }
    if !rows.is_empty() {
        writeln!(writer, "{}", build_results_table(rows, theme, supports_color))?;
    }
    if rows.len() < total {
        writeln!(writer, "({} of {} rows shown)", rows.len(), total)?;
    }
    Ok(())
}

/// Prints the best row of each rule, then the single best row overall.
pub fn print_best<W: Write>(
    writer: &mut W,
    best: &[EvaluationRow],
    overall: Option<&EvaluationRow>,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    print_header(writer, "Best threshold per rule (max MCC)", theme, supports_color)?;
    if best.is_empty() {
        return writeln!(writer, "No thresholds evaluated.");
    }
    writeln!(writer, "{}", build_best_table(best, theme, supports_color))?;
    if let Some(row) = overall {
        let line = format!(
            "Overall best: {} at {} (MCC {:.4})",
            row.test_name,
            format_threshold(row.test_name, row.threshold),
            row.mcc
        );
        writeln!(writer, "{}", paint(&line, ThemeEntry::BestRow, theme, supports_color))?;
    }
    Ok(())
}

/// Prints each rule's grid: size, bounds and every value.
pub fn print_grids<W: Write>(
    writer: &mut W,
    grids: &[(RuleKind, ThresholdGrid)],
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    print_header(writer, "Threshold grids", theme, supports_color)?;
    let mut table = new_table(&["test_name", "points", "values"], theme, supports_color);
    for (kind, grid) in grids {
        let values: Vec<String> = grid.values().iter().map(|v| format_threshold(*kind, *v)).collect();
        table.add_row(vec![
            themed_cell(kind.to_string(), ThemeEntry::RuleName, theme, supports_color),
            number_cell(grid.len().to_string()),
            Cell::new(values.join(", ")),
        ]);
    }
    writeln!(writer, "{table}")
}
