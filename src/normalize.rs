use std::collections::{BTreeMap, BTreeSet};

use crate::record::{PasserRecord, PENDING_CASE};

/// Name → surrogate ID for one reference entity set. IDs are dense and
/// 0-based: distinct names sorted in byte order get 0, 1, 2, ... in
/// that order, so iterating the map visits entities in ID order.
pub type IdMap = BTreeMap<String, u32>;

/// Derive the campus and course ID maps for one run.
///
/// An empty campus cell and the pending-case course sentinel mean "no
/// reference"; neither produces an entity. The assignment depends only
/// on the set of distinct names, so reordering the records changes
/// nothing.
pub fn normalize(records: &[PasserRecord]) -> (IdMap, IdMap) {
    let campuses = records
        .iter()
        .map(|r| r.campus.as_str())
        .filter(|c| !c.is_empty());
    let courses = records
        .iter()
        .map(|r| r.course.as_str())
        .filter(|c| *c != PENDING_CASE);
    (assign_ids(campuses), assign_ids(courses))
}

fn assign_ids<'a>(names: impl Iterator<Item = &'a str>) -> IdMap {
    let distinct: BTreeSet<&str> = names.collect();
    distinct
        .into_iter()
        .enumerate()
        .map(|(id, name)| (name.to_string(), id as u32))
        .collect()
}

// ── Tests ──
