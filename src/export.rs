use std::path::Path;

use csv::WriterBuilder;
use tracing::info;

use crate::common::error::Result;
use crate::domain::NormalizedRow;

/// Column headers of the analyst-facing table, in output order.
pub const HEADER: [&str; 8] = [
    "Board/Commission",
    "Name",
    "Last Action Date",
    "Last Action",
    "Replacing",
    "County",
    "Address",
    "LD of Residence",
];

/// Write the final table to `path`. The header row is written even when
/// there are no data rows.
pub fn write_csv(rows: &[NormalizedRow], path: &Path) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Print the first few rows to the console so a run shows its work without
/// opening the CSV.
pub fn print_preview(rows: &[NormalizedRow], limit: usize) {
    if rows.is_empty() {
        println!("No rows to show.");
        return;
    }
    for row in rows.iter().take(limit) {
        println!(
            "{} | {} | {} | {} | {} | {}",
            row.last_action_date, row.name, row.board, row.last_action, row.replacing, row.county
        );
    }
    if rows.len() > limit {
        println!("... and {} more rows", rows.len() - limit);
    }
}
