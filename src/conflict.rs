use std::collections::{BTreeMap, BTreeSet};

use crate::align::resolve;
use crate::model::{ConflictReport, Match, Value};
use crate::sheet::Sheet;

/// Report the columns that carry a value in two or more of the rows matched
/// by `key`. Resolution runs exactly once: the match set cannot change within
/// a single invocation, so there is nothing to iterate to a fixed point.
///
/// Candidate columns are the intersection of all matched rows' column sets,
/// minus the alignment columns. Fewer than two matches means no conflict is
/// possible and the report is empty.
pub fn detect_conflicts(
    alignment_columns: &[String],
    key: &Value,
    sheets: &[Sheet],
) -> ConflictReport {
    let matches = resolve(alignment_columns, key, sheets);
    conflicts_in(&matches, alignment_columns)
}

/// The single-pass core, shared with the engine driver so an already-resolved
/// match set is not resolved again.
pub fn conflicts_in(matches: &[Match], alignment_columns: &[String]) -> ConflictReport {
    let mut report = ConflictReport::default();
    if matches.len() < 2 {
        return report;
    }

    let mut candidates: BTreeSet<&String> = matches[0].row.keys().collect();
    for m in &matches[1..] {
        let keys: BTreeSet<&String> = m.row.keys().collect();
        candidates = candidates.intersection(&keys).copied().collect();
    }

    for column in candidates {
        if alignment_columns.contains(column) {
            continue;
        }

        let values: BTreeMap<String, Value> = matches
            .iter()
            .filter(|m| !m.row[column].is_absent())
            .map(|m| (m.sheet.clone(), m.row[column].clone()))
            .collect();

        if values.len() >= 2 {
            report.columns.insert(column.clone(), values);
        }
    }

    report
}
