//! Reporting graph built from records.
//!
//! Edges point from parent to child (`reports_to -> email`). Two maps are kept:
//! - `by_email`: lookup index, last record wins on duplicate emails
//! - `children`: adjacency lists in input row order
//!
//! An edge is added for every non-empty `reports_to`, even one that names no
//! known record. Dangling parents are reported later by the policy rules.

use crate::record::Record;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct HierarchyGraph<'a> {
    by_email: BTreeMap<&'a str, &'a Record>,
    children: BTreeMap<&'a str, Vec<&'a str>>,
    /// Keys of `children` in insertion order.
    nodes: Vec<&'a str>,
    /// Emails seen on more than one row, with their row counts.
    duplicates: Vec<(&'a str, usize)>,
}

impl<'a> HierarchyGraph<'a> {
    pub fn build(records: &'a [Record]) -> Self {
        let mut by_email = BTreeMap::<&str, &Record>::new();
        let mut children = BTreeMap::<&str, Vec<&str>>::new();
        let mut nodes = Vec::new();
        let mut counts = BTreeMap::<&str, usize>::new();
        let mut duplicates = Vec::new();

        // 1) One node per record.
        for r in records {
            let email = r.email.as_str();
            by_email.insert(email, r);
            if !children.contains_key(email) {
                children.insert(email, Vec::new());
                nodes.push(email);
            }
            let seen = counts.entry(email).or_default();
            *seen += 1;
            if *seen == 2 {
                duplicates.push(email);
            }
        }

        // 2) Parent -> child edges, row order.
        for r in records {
            if r.reports_to.is_empty() {
                continue;
            }
            let parent = r.reports_to.as_str();
            if !children.contains_key(parent) {
                nodes.push(parent);
            }
            children.entry(parent).or_default().push(r.email.as_str());
        }

        let duplicates = duplicates
            .into_iter()
            .map(|email| (email, counts[email]))
            .collect::<Vec<_>>();
        for (email, rows) in &duplicates {
            tracing::warn!(email, rows, "duplicate email; the last row wins in the lookup index");
        }

        Self {
            by_email,
            children,
            nodes,
            duplicates,
        }
    }

    /// The record registered under `email` (the last one on duplicates).
    pub fn get(&self, email: &str) -> Option<&'a Record> {
        self.by_email.get(email).copied()
    }

    pub fn contains(&self, email: &str) -> bool {
        self.by_email.contains_key(email)
    }

    /// Children of `email`, empty for unknown nodes.
    pub fn children(&self, email: &str) -> &[&'a str] {
        self.children.get(email).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All nodes: record emails in row order, then dangling parents.
    pub fn nodes(&self) -> &[&'a str] {
        &self.nodes
    }

    pub fn duplicates(&self) -> &[(&'a str, usize)] {
        &self.duplicates
    }
}
