//! Portfolio dataset model.
//!
//! An [`AccountRecord`] carries the two risk measures a decision rule compares
//! and the ground-truth SICR label. A [`Dataset`] is an ordered, validated
//! collection of records; once built it is only ever read.
//!
//! License: MIT OR Apache-2.0

use anyhow::Context;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::path::Path;

use crate::errors::{SicrError, SicrResult};

/// One portfolio entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Unique, stable identifier within a dataset.
    pub id: String,
    /// Baseline risk measure at origination, in `[0, 1]`.
    pub origination_measure: f64,
    /// Risk measure at evaluation time, in `[0, 1]`.
    pub current_measure: f64,
    /// Ground truth: `1` when the account did experience a SICR event.
    pub true_label: u8,
}

impl AccountRecord {
    pub fn new(
        id: impl Into<String>,
        origination_measure: f64,
        current_measure: f64,
        true_label: u8,
    ) -> Self {
        Self {
            id: id.into(),
            origination_measure,
            current_measure,
            true_label,
        }
    }
}

/// On-disk JSON layout for a dataset.
#[derive(Debug, Serialize, Deserialize)]
struct DatasetFile {
    accounts: Vec<AccountRecord>,
}

/// A validated, ordered collection of account records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<AccountRecord>,
}

impl Dataset {
    /// Builds a dataset, rejecting duplicate ids, measures outside `[0, 1]`
    /// (or non-finite), and labels outside `{0, 1}`.
    pub fn new(records: Vec<AccountRecord>) -> SicrResult<Self> {
        validate_records(&records)?;
        if !records.is_empty() {
            let positives = records.iter().filter(|r| r.true_label == 1).count();
            if positives == 0 || positives == records.len() {
                warn!(
                    "Dataset of {} accounts contains a single label class; every MCC will be 0.",
                    records.len()
                );
            }
        }
        debug!("Dataset built with {} accounts.", records.len());
        Ok(Self { records })
    }

    pub fn records(&self) -> &[AccountRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Ground-truth labels in record order.
    pub fn true_labels(&self) -> Vec<u8> {
        self.records.iter().map(|r| r.true_label).collect()
    }

    pub fn origination_measures(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.origination_measure).collect()
    }

    pub fn current_measures(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.current_measure).collect()
    }

    /// Share of accounts with `true_label == 1`; `0.0` for an empty dataset.
    pub fn positive_rate(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        let positives = self.records.iter().filter(|r| r.true_label == 1).count();
        positives as f64 / self.records.len() as f64
    }

    /// SHA-256 over a canonical encoding of every record, hex encoded.
    ///
    /// Two datasets with the same records in the same order share a
    /// fingerprint, which lets a report be traced back to its input.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for record in &self.records {
            hasher.update(record.id.as_bytes());
            hasher.update([0u8]);
            hasher.update(record.origination_measure.to_bits().to_le_bytes());
            hasher.update(record.current_measure.to_bits().to_le_bytes());
            hasher.update([record.true_label]);
        }
        hex::encode(hasher.finalize())
    }

    /// Loads and validates a dataset from a JSON file of the form
    /// `{"accounts": [{"id": ..., "origination_measure": ..., ...}]}`.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SicrResult<Self> {
        let path = path.as_ref();
        info!("Loading dataset from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read dataset file {}", path.display()))?;
        let file: DatasetFile = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse dataset file {}", path.display()))?;
        let dataset = Self::new(file.accounts)?;
        info!("Loaded {} accounts from {}.", dataset.len(), path.display());
        Ok(dataset)
    }

    /// Writes the dataset as pretty-printed JSON.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> SicrResult<()> {
        let path = path.as_ref();
        let file = DatasetFile { accounts: self.records.clone() };
        let json = serde_json::to_string_pretty(&file)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write dataset file {}", path.display()))?;
        info!("Wrote {} accounts to {}.", self.len(), path.display());
        Ok(())
    }
}

fn validate_records(records: &[AccountRecord]) -> SicrResult<()> {
    let mut ids = HashSet::new();
    let mut errors = Vec::new();

    for record in records {
        if record.id.is_empty() {
            errors.push("An account has an empty `id` field.".to_string());
        } else if !ids.insert(record.id.as_str()) {
            errors.push(format!("Duplicate account id found: '{}'.", record.id));
        }

        for (field, value) in [
            ("origination_measure", record.origination_measure),
            ("current_measure", record.current_measure),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                errors.push(format!(
                    "Account '{}': `{}` = {} is outside [0, 1].",
                    record.id, field, value
                ));
            }
        }

        if record.true_label > 1 {
            errors.push(format!(
                "Account '{}': `true_label` = {} is not 0 or 1.",
                record.id, record.true_label
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(SicrError::InvalidInput(format!(
            "Dataset validation failed:\n{}",
            errors.join("\n")
        )))
    }
}
