use crate::validation::ValidationReport;
use std::fmt::{self, Write};

/// Plain-text summary for terminals.
pub fn render_text_report(report: &ValidationReport) -> anyhow::Result<String> {
    let mut out = String::new();
    write_report(&mut out, report)?;
    Ok(out)
}

fn write_report(out: &mut String, report: &ValidationReport) -> fmt::Result {
    writeln!(
        out,
        "{} rows: {} valid, {} invalid, {} root",
        report.total(),
        report.valid_records.len(),
        report.invalid_records.len(),
        report.root_records.len()
    )?;

    if !report.dataset_errors.is_empty() {
        writeln!(out, "\nDataset errors:")?;
        for e in &report.dataset_errors {
            writeln!(out, "  - {}", e)?;
        }
    }

    if !report.invalid_records.is_empty() {
        writeln!(out, "\nInvalid records:")?;
        for i in &report.invalid_records {
            let r = &i.record;
            writeln!(out, "  {} ({}, {}): {}", r.email, r.full_name, r.role, i.error)?;
        }
    }

    if report.is_clean() {
        writeln!(out, "\nHierarchy is valid.")?;
    }

    Ok(())
}
