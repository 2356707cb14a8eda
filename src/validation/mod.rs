//! Validation run: graph -> cycles -> root checks -> per-record policy.

use crate::hierarchy::{
    DatasetError, HierarchyGraph, RecordError, check_record, check_roots, find_cycle_members,
};
use crate::record::Record;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Report emails that occur on several rows as dataset errors. Off by
    /// default: the lookup index silently keeps the last row.
    pub flag_duplicate_emails: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidRecord {
    #[serde(flatten)]
    pub record: Record,
    pub error: RecordError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub valid_records: Vec<Record>,
    /// Cycle members first (discovery order), then policy failures (row order).
    pub invalid_records: Vec<InvalidRecord>,
    /// Root rows; they are checked at dataset level only.
    pub root_records: Vec<Record>,
    pub dataset_errors: Vec<DatasetError>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.invalid_records.is_empty() && self.dataset_errors.is_empty()
    }

    /// Number of input rows accounted for.
    pub fn total(&self) -> usize {
        self.valid_records.len() + self.invalid_records.len() + self.root_records.len()
    }
}

/// Validate one dataset. Never fails: every row ends up valid, invalid with a
/// reason, or a root row.
pub fn validate(records: &[Record], options: &ValidationOptions) -> ValidationReport {
    // 1) Graph.
    let graph = HierarchyGraph::build(records);
    tracing::debug!(records = records.len(), nodes = graph.nodes().len(), "graph built");

    let mut report = ValidationReport::default();

    // 2) Cycles. Every row carrying a cycle member's email is reported here.
    let members = find_cycle_members(&graph);
    let in_cycle: BTreeSet<&str> = members.iter().copied().collect();
    for email in &members {
        for r in records.iter().filter(|r| r.email == *email) {
            report.invalid_records.push(InvalidRecord {
                record: r.clone(),
                error: RecordError::Cycle,
            });
        }
    }
    tracing::debug!(members = members.len(), "cycle detection done");

    // 3) Dataset-level checks.
    report.dataset_errors = check_roots(records);
    if options.flag_duplicate_emails {
        report
            .dataset_errors
            .extend(graph.duplicates().iter().map(|(email, rows)| {
                DatasetError::DuplicateEmail {
                    email: email.to_string(),
                    rows: *rows,
                }
            }));
    }

    // 4) Policy over the rest, row order.
    for r in records {
        if in_cycle.contains(r.email.as_str()) {
            continue;
        }
        if r.is_root() {
            report.root_records.push(r.clone());
            continue;
        }
        match check_record(r, &graph) {
            Some(error) => report.invalid_records.push(InvalidRecord {
                record: r.clone(),
                error,
            }),
            None => report.valid_records.push(r.clone()),
        }
    }

    tracing::info!(
        valid = report.valid_records.len(),
        invalid = report.invalid_records.len(),
        roots = report.root_records.len(),
        dataset_errors = report.dataset_errors.len(),
        "validation finished"
    );
    report
}
