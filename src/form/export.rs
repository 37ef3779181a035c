use std::path::Path;
use chrono::NaiveDateTime;
use csv::WriterBuilder;

use crate::error::SheetError;
use crate::sheet::{InstructionTable, SheetSnapshot};

/// Download name for a saved worklog, e.g. `worklog_20250601093000.json`
pub fn worklog_filename(saved_at: NaiveDateTime) -> String {
    format!("worklog_{}.json", saved_at.format("%Y%m%d%H%M%S"))
}

/// Serializes the sheet as a worklog that `read_snapshot` restores unchanged
pub fn worklog_json(snapshot: &SheetSnapshot) -> Result<String, SheetError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Writes the instruction table as CSV, one text row per record
/// Overwrites `csv_path` if it exists
pub fn export_instruction_to_csv(table: &InstructionTable, csv_path: &Path) -> Result<(), SheetError> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .flexible(false)
        .from_path(csv_path)?;

    for row in table.text_rows() {
        wtr.write_record(&row)?;
    }
    wtr.flush()?;

    log::info!("exported {} instruction columns to {}", table.columns.len(), csv_path.display());
    Ok(())
}
