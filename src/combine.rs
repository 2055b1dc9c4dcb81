use std::collections::BTreeSet;

use crate::error::AlignError;
use crate::model::Value;

/// Combine parallel columns into one by set union or, with `drop_missing`,
/// set intersection (only values common to every column survive).
///
/// This is a set operation: input order and duplicate counts are NOT
/// preserved. Output is sorted by value order so results are stable for a
/// given input. A union or intersection of zero columns is not well-defined,
/// so an empty `columns` slice is an error.
pub fn combine_columns(columns: &[Vec<Value>], drop_missing: bool) -> Result<Vec<Value>, AlignError> {
    let mut sets = columns.iter().map(|col| col.iter().collect::<BTreeSet<&Value>>());

    let first = sets
        .next()
        .ok_or_else(|| AlignError::EmptyInput("combine_columns requires at least one column".into()))?;

    let combined = sets.fold(first, |acc, set| {
        if drop_missing {
            acc.intersection(&set).copied().collect()
        } else {
            acc.union(&set).copied().collect()
        }
    });

    Ok(combined.into_iter().cloned().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(values: &[&str]) -> Vec<Value> {
        values.iter().map(|v| Value::text(*v)).collect()
    }

    #[test]
    fn intersection_keeps_common_values() {
        let out = combine_columns(&[col(&["x", "y"]), col(&["y", "z"])], true).unwrap();
        assert_eq!(out, vec![Value::text("y")]);
    }

    #[test]
    fn union_keeps_all_distinct_values() {
        let out = combine_columns(&[col(&["x", "y"]), col(&["y", "z"])], false).unwrap();
        assert_eq!(out, vec![Value::text("x"), Value::text("y"), Value::text("z")]);
    }

    #[test]
    fn intersection_is_subset_of_union() {
        let columns = [col(&["x", "y", "q"]), col(&["y", "z", "q"]), col(&["q", "y"])];
        let inter = combine_columns(&columns, true).unwrap();
        let union = combine_columns(&columns, false).unwrap();
        assert!(inter.iter().all(|v| union.contains(v)));
    }

    #[test]
    fn duplicates_collapse() {
        let out = combine_columns(&[col(&["x", "x", "y"])], false).unwrap();
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn single_column_intersects_to_itself() {
        let out = combine_columns(&[col(&["b", "a"])], true).unwrap();
        assert_eq!(out, vec![Value::text("a"), Value::text("b")]);
    }

    #[test]
    fn empty_input_is_an_error() {
        let err = combine_columns(&[], false).unwrap_err();
        assert!(matches!(err, AlignError::EmptyInput(_)));
    }

    #[test]
    fn output_is_stable_for_same_input() {
        let columns = [col(&["m", "k"]), col(&["k", "m", "a"])];
        let a = combine_columns(&columns, false).unwrap();
        let b = combine_columns(&columns, false).unwrap();
        assert_eq!(a, b);
    }
}
