//! Output formats for a validation report. Kept apart from the engine,
//! which only produces `ValidationReport`.

pub mod html;
pub mod text;

use crate::validation::ValidationReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Format {
    #[default]
    Json,
    Text,
    Html,
}

pub fn render(report: &ValidationReport, format: Format) -> anyhow::Result<String> {
    match format {
        Format::Json => Ok(serde_json::to_string_pretty(report)? + "\n"),
        Format::Text => text::render_text_report(report),
        Format::Html => html::render_html_report(report),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::row::record;
    use crate::validation::{ValidationOptions, validate};
    use pretty_assertions::assert_eq;

    #[test]
    fn json_format_round_trips_the_report() {
        let records = vec![
            record("root@x", "R", "Root", ""),
            record("c@x", "C", "Caller", "root@x"),
        ];
        let report = validate(&records, &ValidationOptions::default());
        let out = render(&report, Format::Json).unwrap();
        assert!(out.ends_with("}\n"));

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value, serde_json::to_value(&report).unwrap());
        assert_eq!(
            value["invalidRecords"][0]["error"],
            "Caller cannot report to Root (R)"
        );
    }
}
