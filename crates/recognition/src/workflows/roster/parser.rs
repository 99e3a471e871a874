use std::io::Read;

use csv::StringRecord;

use super::normalizer::normalize_header;
use super::RosterImportError;
use crate::workflows::awards::{EmployeeId, EmployeeRecord};

pub const REQUIRED_COLUMNS: [&str; 9] = [
    "employee_id",
    "name",
    "department",
    "performance_score",
    "peer_nominations",
    "attendance_pct",
    "manager_rating",
    "months_employed",
    "email",
];

/// Column positions resolved from the header row.
struct ColumnIndex {
    positions: [usize; REQUIRED_COLUMNS.len()],
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord) -> Result<Self, RosterImportError> {
        let normalized: Vec<String> = headers.iter().map(normalize_header).collect();
        let mut positions = [0; REQUIRED_COLUMNS.len()];
        let mut missing = Vec::new();

        for (slot, column) in REQUIRED_COLUMNS.iter().enumerate() {
            match normalized.iter().position(|header| header == column) {
                Some(position) => positions[slot] = position,
                None => missing.push((*column).to_string()),
            }
        }

        if missing.is_empty() {
            Ok(Self { positions })
        } else {
            Err(RosterImportError::MissingColumns(missing))
        }
    }

    fn field<'r>(&self, record: &'r StringRecord, column: &str) -> &'r str {
        REQUIRED_COLUMNS
            .iter()
            .position(|candidate| *candidate == column)
            .and_then(|slot| record.get(self.positions[slot]))
            .unwrap_or("")
    }
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<EmployeeRecord>, RosterImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let columns = ColumnIndex::resolve(csv_reader.headers()?)?;
    let mut records = Vec::new();

    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        let row = index + 1;
        let text = |column: &str| columns.field(&record, column).to_string();

        records.push(EmployeeRecord {
            employee_id: EmployeeId(text("employee_id")),
            name: text("name"),
            department: text("department"),
            performance_score: parse_number(row, "performance_score", &record, &columns)?,
            peer_nominations: parse_count(row, "peer_nominations", &record, &columns)?,
            attendance_pct: parse_number(row, "attendance_pct", &record, &columns)?,
            manager_rating: parse_number(row, "manager_rating", &record, &columns)?,
            months_employed: parse_count(row, "months_employed", &record, &columns)?,
            email: text("email"),
        });
    }

    Ok(records)
}

fn parse_number(
    row: usize,
    field: &'static str,
    record: &StringRecord,
    columns: &ColumnIndex,
) -> Result<f64, RosterImportError> {
    let value = columns.field(record, field);
    value
        .parse::<f64>()
        .map_err(|_| RosterImportError::InvalidNumber {
            row,
            field,
            value: value.to_string(),
        })
}

/// Spreadsheets often export whole numbers as `3.0`; anything fractional or
/// negative is rejected.
fn parse_count(
    row: usize,
    field: &'static str,
    record: &StringRecord,
    columns: &ColumnIndex,
) -> Result<u32, RosterImportError> {
    let value = columns.field(record, field);
    let invalid = || RosterImportError::InvalidCount {
        row,
        field,
        value: value.to_string(),
    };

    if let Ok(count) = value.parse::<u32>() {
        return Ok(count);
    }

    let number = value.parse::<f64>().map_err(|_| invalid())?;
    if number.is_finite() && number >= 0.0 && number.fract() == 0.0 && number <= f64::from(u32::MAX) {
        Ok(number as u32)
    } else {
        Err(invalid())
    }
}
