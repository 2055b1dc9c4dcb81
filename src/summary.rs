use crate::model::{AlignSummary, KeyConflicts, MergedTable, Value};

/// Roll the merge output up into counts for the presentation layer.
/// `table` is the pre-screening merge (one row per key); `rows_emitted`
/// reflects what actually ships after screening.
pub fn compute_summary(
    keys: &[Value],
    keys_matched: usize,
    table: &MergedTable,
    conflicts: &[KeyConflicts],
    rows_emitted: usize,
) -> AlignSummary {
    let absent_cells = table
        .rows
        .iter()
        .flat_map(|row| row.iter())
        .filter(|v| v.is_absent())
        .count();

    AlignSummary {
        keys_total: keys.len(),
        keys_matched,
        keys_unmatched: keys.len() - keys_matched,
        conflicted_keys: conflicts.len(),
        conflicted_columns: conflicts.iter().map(|c| c.report.len()).sum(),
        absent_cells,
        rows_emitted,
    }
}
