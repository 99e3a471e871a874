//! Monthly roster snapshot ingestion from HR spreadsheet exports.

mod normalizer;
mod parser;

pub use parser::REQUIRED_COLUMNS;

use std::io::Read;
use std::path::Path;

use crate::workflows::awards::EmployeeRecord;

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingColumns(Vec<String>),
    InvalidNumber {
        row: usize,
        field: &'static str,
        value: String,
    },
    InvalidCount {
        row: usize,
        field: &'static str,
        value: String,
    },
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster export: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterImportError::MissingColumns(columns) => {
                write!(f, "roster is missing required columns: {}", columns.join(", "))
            }
            RosterImportError::InvalidNumber { row, field, value } => write!(
                f,
                "row {}: {} must be a number (found '{}')",
                row, field, value
            ),
            RosterImportError::InvalidCount { row, field, value } => write!(
                f,
                "row {}: {} must be a non-negative whole number (found '{}')",
                row, field, value
            ),
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Turns a roster export into typed records; metric range checks are left to
/// the scoring engine so both entry points report them the same way.
pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<EmployeeRecord>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<EmployeeRecord>, RosterImportError> {
        let records = parser::parse_records(reader)?;
        tracing::debug!(rows = records.len(), "roster imported");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::awards::EmployeeId;
    use std::io::{Cursor, Write};

    const HEADER: &str = "employee_id,name,department,performance_score,peer_nominations,attendance_pct,manager_rating,months_employed,email";

    #[test]
    fn header_normalization_strips_invisible_characters() {
        assert_eq!(
            normalizer::normalize_header("\u{feff} Employee  ID "),
            "employee_id"
        );
        assert_eq!(normalizer::normalize_header("Email\u{200b}"), "email");
    }

    #[test]
    fn importer_reads_typed_records() {
        let csv = format!(
            "{HEADER}\nA, Ada Park ,Engineering,90,2,95.5,8,12,ada@example.com\nB,Ben Ode,Support,70,5.0,80,9,3,ben@example.com\n"
        );

        let records = RosterImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].employee_id, EmployeeId::from("A"));
        assert_eq!(records[0].name, "Ada Park");
        assert_eq!(records[0].attendance_pct, 95.5);
        assert_eq!(records[1].peer_nominations, 5);
        assert_eq!(records[1].months_employed, 3);
    }

    #[test]
    fn importer_accepts_reordered_and_decorated_headers() {
        let csv = "\u{feff}Email,Months Employed,Manager Rating,Attendance Pct,Peer Nominations,Performance Score,Department,Name,Employee ID\n\
c@example.com,7,6.5,91,1,77,Finance,Cy,C\n";

        let records = RosterImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(records[0].employee_id, EmployeeId::from("C"));
        assert_eq!(records[0].months_employed, 7);
        assert_eq!(records[0].manager_rating, 6.5);
        assert_eq!(records[0].email, "c@example.com");
    }

    #[test]
    fn importer_lists_every_missing_column() {
        let csv = "employee_id,name,department,performance_score,attendance_pct,manager_rating\nA,Ada,Eng,90,95,8\n";

        let error = RosterImporter::from_reader(Cursor::new(csv)).expect_err("missing columns");

        match error {
            RosterImportError::MissingColumns(columns) => assert_eq!(
                columns,
                vec!["peer_nominations", "months_employed", "email"]
            ),
            other => panic!("expected missing columns, got {other:?}"),
        }
    }

    #[test]
    fn fractional_count_is_rejected_with_row() {
        let csv = format!(
            "{HEADER}\nA,Ada,Eng,90,2,95,8,12,a@example.com\nB,Ben,Eng,70,2.5,80,9,8,b@example.com\n"
        );

        let error = RosterImporter::from_reader(Cursor::new(csv)).expect_err("invalid count");

        match error {
            RosterImportError::InvalidCount { row, field, value } => {
                assert_eq!(row, 2);
                assert_eq!(field, "peer_nominations");
                assert_eq!(value, "2.5");
            }
            other => panic!("expected invalid count, got {other:?}"),
        }
    }

    #[test]
    fn negative_tenure_is_rejected() {
        let csv = format!("{HEADER}\nA,Ada,Eng,90,2,95,8,-1,a@example.com\n");

        let error = RosterImporter::from_reader(Cursor::new(csv)).expect_err("invalid count");
        assert!(matches!(
            error,
            RosterImportError::InvalidCount { field: "months_employed", .. }
        ));
    }

    #[test]
    fn non_numeric_score_is_rejected() {
        let csv = format!("{HEADER}\nA,Ada,Eng,ninety,2,95,8,12,a@example.com\n");

        let error = RosterImporter::from_reader(Cursor::new(csv)).expect_err("invalid number");
        assert_eq!(
            error.to_string(),
            "row 1: performance_score must be a number (found 'ninety')"
        );
    }

    #[test]
    fn out_of_range_values_are_left_for_the_engine() {
        let csv = format!("{HEADER}\nA,Ada,Eng,140,2,95,8,12,a@example.com\n");

        let records = RosterImporter::from_reader(Cursor::new(csv)).expect("import succeeds");
        assert_eq!(records[0].performance_score, 140.0);
    }

    #[test]
    fn importer_reads_from_path() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "{HEADER}").expect("write header");
        writeln!(file, "A,Ada,Eng,90,2,95,8,12,a@example.com").expect("write row");

        let records = RosterImporter::from_path(file.path()).expect("import succeeds");
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn importer_from_path_propagates_io_errors() {
        let error = RosterImporter::from_path("./does-not-exist.csv").expect_err("io error");

        match error {
            RosterImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
