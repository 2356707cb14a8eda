//! Policy rules: root uniqueness and role adjacency.
//!
//! Per-record rules run in a fixed order and the first failing rule decides
//! the record's error. Each rule is a plain function so it can be exercised
//! on its own.

use crate::hierarchy::graph::HierarchyGraph;
use crate::record::{Record, Role};
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Separator that marks a `reports_to` value naming several parents.
pub const PARENT_SEPARATOR: char = ';';

/// Why a single record is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("Cycle detected (part of cycle)")]
    Cycle,

    #[error("Cannot report to multiple parents ({0})")]
    MultipleParents(String),

    #[error("Missing reports-to entry")]
    MissingReportsTo,

    #[error("Reports to non-existent user ({0})")]
    UnknownParent(String),

    #[error("Unknown role '{0}'")]
    UnknownRole(String),

    #[error("{role} cannot report to {parent_role} ({parent_name})")]
    RoleMismatch {
        role: Role,
        /// Verbatim role string of the parent record.
        parent_role: String,
        parent_name: String,
    },
}

/// Problems with the dataset as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    #[error("Invalid Root configuration: Found {0} Root users (must be exactly 1)")]
    RootCount(usize),

    #[error(
        "Invalid Root configuration: Root user {email} must not report to anyone (reports to {reports_to})"
    )]
    RootHasParent { email: String, reports_to: String },

    #[error("Duplicate email {email} appears on {rows} rows")]
    DuplicateEmail { email: String, rows: usize },
}

// Both error types go out as their message text.
impl Serialize for RecordError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Serialize for DatasetError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub type Rule = fn(&Record, &HierarchyGraph<'_>) -> Option<RecordError>;

/// Per-record rules in priority order.
pub const RULES: [(&str, Rule); 5] = [
    ("multiple-parents", multiple_parents),
    ("missing-reports-to", missing_reports_to),
    ("unknown-parent", unknown_parent),
    ("unknown-role", unknown_role),
    ("role-adjacency", role_adjacency),
];

/// First failing rule for a non-root, non-cycle record; `None` if valid.
pub fn check_record(record: &Record, graph: &HierarchyGraph<'_>) -> Option<RecordError> {
    for (name, rule) in RULES {
        if let Some(err) = rule(record, graph) {
            tracing::debug!(email = %record.email, rule = name, error = %err, "record rejected");
            return Some(err);
        }
    }
    None
}

pub fn multiple_parents(record: &Record, _: &HierarchyGraph<'_>) -> Option<RecordError> {
    record
        .reports_to
        .contains(PARENT_SEPARATOR)
        .then(|| RecordError::MultipleParents(record.reports_to.clone()))
}

pub fn missing_reports_to(record: &Record, _: &HierarchyGraph<'_>) -> Option<RecordError> {
    record
        .reports_to
        .is_empty()
        .then_some(RecordError::MissingReportsTo)
}

pub fn unknown_parent(record: &Record, graph: &HierarchyGraph<'_>) -> Option<RecordError> {
    (!graph.contains(&record.reports_to))
        .then(|| RecordError::UnknownParent(record.reports_to.clone()))
}

/// Fires whatever the parent looks like: unknown roles have no adjacency rule.
pub fn unknown_role(record: &Record, _: &HierarchyGraph<'_>) -> Option<RecordError> {
    record
        .role()
        .is_none()
        .then(|| RecordError::UnknownRole(record.role.clone()))
}

pub fn role_adjacency(record: &Record, graph: &HierarchyGraph<'_>) -> Option<RecordError> {
    let role = record.role()?;
    let parent = graph.get(&record.reports_to)?;
    if parent.role().is_some_and(|p| role.may_report_to(p)) {
        return None;
    }
    Some(RecordError::RoleMismatch {
        role,
        parent_role: parent.role.clone(),
        parent_name: parent.full_name.clone(),
    })
}

/// Dataset-level root checks: exactly one Root row, and it has no parent.
pub fn check_roots(records: &[Record]) -> Vec<DatasetError> {
    let roots: Vec<&Record> = records.iter().filter(|r| r.is_root()).collect();

    match roots.as_slice() {
        [root] if !root.reports_to.is_empty() => vec![DatasetError::RootHasParent {
            email: root.email.clone(),
            reports_to: root.reports_to.clone(),
        }],
        [_] => vec![],
        _ => vec![DatasetError::RootCount(roots.len())],
    }
}
