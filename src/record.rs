use serde::{Deserialize, Serialize};

/// Course value the site shows for passers whose course assignment is
/// still under review. Never becomes a course entity; maps to NULL in
/// SQL output.
pub const PENDING_CASE: &str = "**Pending Case";

/// One row of the results table, in source order. `campus` may be empty
/// (no assigned campus) and `course` may be [`PENDING_CASE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasserRecord {
    pub name: String,
    pub campus: String,
    pub course: String,
}
