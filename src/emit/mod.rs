pub mod json;
pub mod sql;

use clap::ValueEnum;

use crate::record::PasserRecord;

/// Output mode selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Flat JSON array of the raw records → passers.json
    Json,
    /// Normalized relational schema + inserts → passers.sql
    Sql,
}

/// Delimiter joining member fields when records are packed.
pub const PACK_DELIMITER: &str = "|";

/// Group `batch_size` consecutive records into one composite record,
/// joining each field across the group with [`PACK_DELIMITER`]. The
/// trailing group may be smaller.
///
/// This exists to satisfy downstream ingestion tools with a
/// record-count cap (the hosted search index the JSON feeds takes five
/// passers per record on its free tier). Entity normalization never
/// sees packed records.
pub fn pack_records(records: &[PasserRecord], batch_size: usize) -> Vec<PasserRecord> {
    records
        .chunks(batch_size)
        .map(|chunk| {
            let join = |field: fn(&PasserRecord) -> &str| {
                chunk
                    .iter()
                    .map(field)
                    .collect::<Vec<_>>()
                    .join(PACK_DELIMITER)
            };
            PasserRecord {
                name: join(|r| &r.name),
                campus: join(|r| &r.campus),
                course: join(|r| &r.course),
            }
        })
        .collect()
}

// ── Tests ──
