// sicr-core/src/lib.rs
//! # SICR Core Library
//!
//! `sicr-core` provides the platform-independent logic for evaluating
//! "significant increase in credit risk" decision rules. It scores every
//! candidate threshold of a rule against ground-truth labels with the
//! Matthews Correlation Coefficient and selects the best candidate per rule.
//!
//! The library is pure and stateless: it consumes an in-memory [`Dataset`]
//! and produces a [`ResultTable`]. Presentation (tables, JSON, colours) is
//! left to the caller.
//!
//! ## Modules
//!
//! * `dataset`: `AccountRecord` and the validated `Dataset` collection, JSON load/save.
//! * `rules`: the `DecisionRule` trait and its absolute-difference and ratio implementations.
//! * `sweep`: the threshold sweep engine producing `EvaluationRow`s in grid order.
//! * `table`: `ResultTable` aggregation and stable best-row selection.
//! * `config`: `SweepConfig`, threshold grids, scenario lookup and overrides.
//! * `synthetic`: a seeded synthetic portfolio source.
//! * `headless`: one-shot comparison of both rules.
//! * `errors`: the `SicrError` enum.
//!
//! ## Usage Example
//!
//! ```rust
//! use sicr_core::{sweep, select_best, AbsoluteDifferenceRule, AccountRecord, Dataset};
//!
//! fn main() -> Result<(), sicr_core::SicrError> {
//!     let dataset = Dataset::new(vec![
//!         AccountRecord::new("A", 0.05, 0.05, 0),
//!         AccountRecord::new("B", 0.05, 0.10, 1),
//!         AccountRecord::new("C", 0.03, 0.031, 0),
//!         AccountRecord::new("D", 0.02, 0.09, 1),
//!     ])?;
//!
//!     let rows = sweep(&dataset, &AbsoluteDifferenceRule, &[0.02, 0.04, 0.06])?;
//!     let best = select_best(&rows).expect("grid is not empty");
//!     assert_eq!(best.threshold, 0.02);
//!     assert_eq!(best.mcc, 1.0);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`SicrResult`]. Degenerate confusion matrices,
//! empty grids and empty datasets are not errors: they yield MCC `0.0` or an
//! empty result.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod dataset;
pub mod errors;
pub mod headless;
pub mod rules;
pub mod sweep;
pub mod synthetic;
pub mod table;

/// Re-exports the configuration types and loaders.
pub use config::{
    apply_overrides,
    load_scenario_by_name,
    scenario_candidate_paths,
    GeneratorConfig,
    GridSpec,
    GridsConfig,
    SweepConfig,
    SweepOverrides,
    ThresholdGrid,
    MAX_GRID_POINTS,
};

pub use dataset::{AccountRecord, Dataset};

/// Re-exports the custom error type for clear error reporting.
pub use errors::{SicrError, SicrResult};

pub use rules::{AbsoluteDifferenceRule, DecisionRule, RatioRule, RuleKind};

pub use sweep::{sweep, sweep_parallel, EvaluationRow};

pub use table::{select_best, ResultTable};

pub use synthetic::{generate_portfolio, PortfolioGenerator};

/// Re-exports types and functions for one-shot, non-interactive use.
pub use headless::{run_comparison, run_synthetic_comparison, ComparisonReport, RunMetadata};

/// Re-exports the scoring primitives from `sicr-metrics`.
pub use sicr_metrics::{evaluate, ConfusionCounts, Evaluation};
