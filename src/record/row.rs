use serde::Serialize;
use std::fmt;

/// Column order of a hierarchy row.
pub const COLUMNS: [&str; 4] = ["email", "fullName", "role", "reportsTo"];

/// A single hierarchy entry. Field values are kept verbatim (trimmed only) so
/// validation can quote them back in error messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub reports_to: String,
}

impl Record {
    /// Build a record from fields in `COLUMNS` order.
    ///
    /// Missing trailing fields become empty strings; fields past the fourth
    /// are ignored.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Self {
        let field = |i: usize| {
            fields
                .get(i)
                .map(|f| f.as_ref().trim().to_string())
                .unwrap_or_default()
        };
        Self {
            email: field(0),
            full_name: field(1),
            role: field(2),
            reports_to: field(3),
        }
    }

    /// The recognized role, or `None` for anything outside the closed set.
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }

    pub fn is_root(&self) -> bool {
        self.role() == Some(Role::Root)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Root,
    Admin,
    Manager,
    Caller,
}

/// Role -> roles its parent may hold. Root has no parent at all.
const PERMITTED_PARENTS: [(Role, &[Role]); 4] = [
    (Role::Root, &[]),
    (Role::Admin, &[Role::Root]),
    (Role::Manager, &[Role::Admin, Role::Manager]),
    (Role::Caller, &[Role::Manager]),
];

impl Role {
    /// Exact, case-sensitive match against the role names.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Root" => Some(Role::Root),
            "Admin" => Some(Role::Admin),
            "Manager" => Some(Role::Manager),
            "Caller" => Some(Role::Caller),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Root => "Root",
            Role::Admin => "Admin",
            Role::Manager => "Manager",
            Role::Caller => "Caller",
        }
    }

    pub fn permitted_parents(self) -> &'static [Role] {
        PERMITTED_PARENTS
            .iter()
            .find(|(role, _)| *role == self)
            .map(|(_, parents)| *parents)
            .unwrap_or(&[])
    }

    pub fn may_report_to(self, parent: Role) -> bool {
        self.permitted_parents().contains(&parent)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shorthand for tests across the crate.
#[cfg(test)]
pub(crate) fn record(email: &str, full_name: &str, role: &str, reports_to: &str) -> Record {
    Record::from_fields(&[email, full_name, role, reports_to])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn from_fields_trims_every_column() {
        let r = Record::from_fields(&["  a@x ", " Ann Lee", "Admin ", "\troot@x\r"]);
        assert_eq!(r, record("a@x", "Ann Lee", "Admin", "root@x"));
    }

    #[test]
    fn from_fields_pads_short_rows_and_drops_extras() {
        let short = Record::from_fields(&["a@x", "Ann"]);
        assert_eq!(short, record("a@x", "Ann", "", ""));

        let long = Record::from_fields(&["a@x", "Ann", "Caller", "m@x", "extra"]);
        assert_eq!(long, record("a@x", "Ann", "Caller", "m@x"));
    }

    #[test]
    fn malformed_values_are_kept_verbatim() {
        let r = record("a@x", "Ann", "Supervisor", "b@x;c@x");
        assert_eq!(r.role, "Supervisor");
        assert_eq!(r.reports_to, "b@x;c@x");
        assert_eq!(r.role(), None);
    }

    #[rstest]
    #[case("Root", Some(Role::Root))]
    #[case("Admin", Some(Role::Admin))]
    #[case("Manager", Some(Role::Manager))]
    #[case("Caller", Some(Role::Caller))]
    #[case("admin", None)]
    #[case("", None)]
    fn role_parse_is_exact(#[case] input: &str, #[case] expected: Option<Role>) {
        assert_eq!(Role::parse(input), expected);
    }

    #[rstest]
    #[case(Role::Admin, Role::Root, true)]
    #[case(Role::Admin, Role::Admin, false)]
    #[case(Role::Manager, Role::Admin, true)]
    #[case(Role::Manager, Role::Manager, true)]
    #[case(Role::Manager, Role::Root, false)]
    #[case(Role::Caller, Role::Manager, true)]
    #[case(Role::Caller, Role::Admin, false)]
    #[case(Role::Root, Role::Root, false)]
    fn adjacency_table(#[case] child: Role, #[case] parent: Role, #[case] allowed: bool) {
        assert_eq!(child.may_report_to(parent), allowed);
    }

    #[test]
    fn serializes_with_camel_case_columns() {
        let json = serde_json::to_value(record("a@x", "Ann", "Admin", "root@x")).unwrap();
        for column in COLUMNS {
            assert!(json.get(column).is_some(), "missing column {column}");
        }
        assert_eq!(json["fullName"], "Ann");
        assert_eq!(json["reportsTo"], "root@x");
    }
}
