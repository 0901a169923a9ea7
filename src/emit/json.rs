use crate::record::PasserRecord;

/// Serialize the record sequence as one JSON array, exactly as
/// collected (packing, when requested, happens before this point).
pub fn render(records: &[PasserRecord]) -> serde_json::Result<String> {
    serde_json::to_string(records)
}

// ── Tests ──
