use crate::error::InputError;
use crate::record::row::Record;
use anyhow::Context;
use std::fs;

/// Turn already-split rows into records. The first row is the header and is
/// discarded without looking at it.
pub fn parse_rows<I, R, S>(rows: I) -> Vec<Record>
where
    I: IntoIterator<Item = R>,
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    rows.into_iter()
        .skip(1)
        .map(|row| Record::from_fields(row.as_ref()))
        .collect()
}

/// Split delimited text into rows and parse them.
///
/// Blank lines are skipped, so the header is the first non-blank line.
/// No quoting is understood: every `delimiter` splits a field.
pub fn parse_text(text: &str, delimiter: char) -> Result<Vec<Record>, InputError> {
    let rows: Vec<Vec<&str>> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split(delimiter).collect())
        .collect();

    if rows.is_empty() {
        return Err(InputError::Empty);
    }

    Ok(parse_rows(rows))
}

/// Read a hierarchy file and parse it.
pub fn parse_file(path: &str, delimiter: char) -> anyhow::Result<Vec<Record>> {
    let text = fs::read_to_string(path).with_context(|| format!("read hierarchy file {}", path))?;
    let records =
        parse_text(&text, delimiter).with_context(|| format!("parse hierarchy file {}", path))?;
    tracing::debug!(path, records = records.len(), "parsed hierarchy file");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::row::record;
    use pretty_assertions::assert_eq;

    #[test]
    fn header_is_discarded_unchecked() {
        let text = "whatever,goes,here\nroot@x, Root Person ,Root,\na@x,A,Admin,root@x\n";
        let records = parse_text(text, ',').unwrap();
        assert_eq!(
            records,
            vec![
                record("root@x", "Root Person", "Root", ""),
                record("a@x", "A", "Admin", "root@x"),
            ]
        );
    }

    #[test]
    fn crlf_and_blank_lines() {
        let text = "\r\nEmail,Name,Role,ReportsTo\r\n\r\nroot@x,R,Root,\r\n   \r\n";
        let records = parse_text(text, ',').unwrap();
        assert_eq!(records, vec![record("root@x", "R", "Root", "")]);
    }

    #[test]
    fn header_only_yields_no_records() {
        assert_eq!(parse_text("Email,Name,Role,ReportsTo", ',').unwrap(), vec![]);
    }

    #[test]
    fn empty_text_is_an_input_error() {
        assert_eq!(parse_text("", ','), Err(InputError::Empty));
        assert_eq!(parse_text(" \n\t\n", ','), Err(InputError::Empty));
    }

    #[test]
    fn multi_parent_value_survives_parsing() {
        let records = parse_text("h\na@x,A,Admin,b@x;c@x", ',').unwrap();
        assert_eq!(records[0].reports_to, "b@x;c@x");
    }

    #[test]
    fn custom_delimiter() {
        let records = parse_text("h\ta\tb\tc\nroot@x\tR\tRoot\t", '\t').unwrap();
        assert_eq!(records, vec![record("root@x", "R", "Root", "")]);
    }

    #[test]
    fn parse_rows_from_split_fields() {
        let rows = vec![
            vec!["email", "fullName", "role", "reportsTo"],
            vec!["m@x", "M", "Manager", "a@x"],
        ];
        assert_eq!(parse_rows(rows), vec![record("m@x", "M", "Manager", "a@x")]);
    }

    #[test]
    fn parse_file_reports_missing_path() {
        let err = parse_file("/definitely/not/here.csv", ',').unwrap_err();
        assert!(format!("{err:#}").contains("/definitely/not/here.csv"));
    }

    #[test]
    fn parse_file_reads_records() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Email;Name;Role;ReportsTo\nroot@x;R;Root;\na@x;A;Admin;root@x\n").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let records = parse_file(&path, ';').unwrap();
        assert_eq!(
            records,
            vec![
                record("root@x", "R", "Root", ""),
                record("a@x", "A", "Admin", "root@x"),
            ]
        );
    }

    #[test]
    fn parse_file_rejects_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap().to_string();
        let err = parse_file(&path, ',').unwrap_err();
        assert_eq!(err.downcast_ref::<InputError>(), Some(&InputError::Empty));
    }
}
