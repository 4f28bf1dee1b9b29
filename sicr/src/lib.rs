// sicr/src/lib.rs
//! # SICR CLI Application
//!
//! Command-line front end for `sicr-core`: load or synthesize a portfolio,
//! sweep both decision rules across their threshold grids, and print the
//! result table plus the best threshold per rule.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
