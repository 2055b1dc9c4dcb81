use std::collections::BTreeMap;

use crate::align::resolve;
use crate::error::AlignError;
use crate::model::{MergedTable, Value};
use crate::sheet::Sheet;

/// Assemble one unified table over `keys`.
///
/// The output schema is fixed before any key is processed: the alignment
/// output column first, then the union of every sheet's declared
/// non-alignment columns in first-occurrence order across the sheets as
/// supplied. Every key yields exactly one row, in key order, absent-filled
/// where no sheet matched.
///
/// When several matched rows define the same column, the value comes from the
/// highest-priority sheet that holds a non-absent value. `priority` lists
/// sheet names in preference order; sheets it leaves out fall after the
/// listed ones, in input order. This is the silent first-wins policy — a
/// caller that wants the competing values surfaced instead runs
/// [`crate::conflict::detect_conflicts`].
///
/// `strict` turns an empty `keys` sequence into [`AlignError::EmptyKeySequence`];
/// otherwise it merges to an empty table so zero-length selections need no
/// special-casing.
pub fn merge(
    alignment_col_name: &str,
    alignment_columns: &[String],
    keys: &[Value],
    sheets: &[Sheet],
    priority: &[String],
    strict: bool,
) -> Result<MergedTable, AlignError> {
    if strict && keys.is_empty() {
        return Err(AlignError::EmptyKeySequence);
    }

    let rank = priority_ranks(sheets, priority)?;

    // Schema comes from declared column sets, not from whichever sheets end
    // up matching, so it is stable across rows and across key selections.
    let mut columns = vec![alignment_col_name.to_string()];
    for sheet in sheets {
        for col in sheet.columns() {
            if alignment_columns.contains(col) || columns.contains(col) {
                continue;
            }
            columns.push(col.clone());
        }
    }

    let mut rows = Vec::with_capacity(keys.len());
    for key in keys {
        let mut matches = resolve(alignment_columns, key, sheets);
        matches.sort_by_key(|m| rank[m.sheet.as_str()]);

        let mut row = vec![Value::Absent; columns.len()];
        row[0] = key.clone();
        for (i, column) in columns.iter().enumerate().skip(1) {
            for m in &matches {
                match m.row.get(column) {
                    Some(v) if !v.is_absent() => {
                        row[i] = v.clone();
                        break;
                    }
                    _ => {}
                }
            }
        }
        rows.push(row);
    }

    Ok(MergedTable { columns, rows })
}

/// Sheet names in conflict-resolution order: listed priorities first, then
/// the remaining sheets in input order.
fn priority_ranks(
    sheets: &[Sheet],
    priority: &[String],
) -> Result<BTreeMap<String, usize>, AlignError> {
    for name in priority {
        if !sheets.iter().any(|s| s.name() == name) {
            return Err(AlignError::UnknownSheet(name.clone()));
        }
    }

    let mut ordered: Vec<String> = priority.to_vec();
    for sheet in sheets {
        if !ordered.iter().any(|n| n == sheet.name()) {
            ordered.push(sheet.name().to_string());
        }
    }

    Ok(ordered.into_iter().enumerate().map(|(i, n)| (n, i)).collect())
}
