use std::io::Write;

use super::WinnerHistoryEntry;

/// Column order of the exported history, matching the stored entry fields.
pub const HISTORY_CSV_COLUMNS: [&str; 6] = [
    "period",
    "employee_id",
    "name",
    "department",
    "composite_score",
    "selected_at",
];

/// Writes `entries` as CSV, one row per period; an empty history still gets the header row.
pub fn write_history_csv<W: Write>(
    entries: &[WinnerHistoryEntry],
    writer: W,
) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(HISTORY_CSV_COLUMNS)?;
    for entry in entries {
        writer.serialize(entry)?;
    }
    writer.flush()?;
    Ok(())
}
