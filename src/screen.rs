use crate::config::ScreenConfig;
use crate::model::{MergedTable, Value};

/// How a merged-table column participates in screening. Resolved once when
/// the screen config is compiled against a table, never re-discovered per
/// row.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnRole {
    /// Carries the alignment key; never screened.
    Identity,
    /// Screened directly against its own threshold.
    Criterion(Value),
    /// One alternative within a requirement group: a threshold on any member
    /// is satisfied by any member.
    Group(Vec<String>),
    /// No threshold applies.
    Free,
}

pub fn role_of(column: &str, identity: &str, config: &ScreenConfig) -> ColumnRole {
    if column == identity {
        return ColumnRole::Identity;
    }
    if let Some(group) = config.groups.iter().find(|g| g.iter().any(|m| m == column)) {
        return ColumnRole::Group(group.clone());
    }
    match config.thresholds.get(column) {
        Some(threshold) => ColumnRole::Criterion(threshold.clone()),
        None => ColumnRole::Free,
    }
}

/// One compiled check: the row passes when any candidate column meets the
/// threshold.
struct Requirement {
    candidates: Vec<usize>,
    threshold: Value,
}

/// Keep the rows of `table` that satisfy every threshold in `config`.
///
/// Numeric thresholds are minimums, text thresholds are exact equality, and
/// an absent value never satisfies anything. A threshold on a grouped column
/// is met when ANY member of its group meets it. Thresholds naming columns
/// the table does not have are ignored — partial coverage is the expected
/// case, not a failure. The first column is treated as the identity column.
pub fn screen(table: &MergedTable, config: &ScreenConfig) -> MergedTable {
    let identity = table.columns.first().map(String::as_str).unwrap_or("");

    let mut requirements = Vec::new();
    for (column, threshold) in &config.thresholds {
        let candidates: Vec<usize> = match role_of(column, identity, config) {
            ColumnRole::Criterion(_) | ColumnRole::Free => {
                table.column_index(column).into_iter().collect()
            }
            ColumnRole::Group(members) => members
                .iter()
                .filter_map(|m| table.column_index(m))
                .collect(),
            ColumnRole::Identity => Vec::new(),
        };
        if !candidates.is_empty() {
            requirements.push(Requirement {
                candidates,
                threshold: threshold.clone(),
            });
        }
    }

    let rows = table
        .rows
        .iter()
        .filter(|row| {
            requirements.iter().all(|req| {
                req.candidates
                    .iter()
                    .any(|&i| meets(&row[i], &req.threshold))
            })
        })
        .cloned()
        .collect();

    MergedTable {
        columns: table.columns.clone(),
        rows,
    }
}

fn meets(value: &Value, threshold: &Value) -> bool {
    match (value, threshold) {
        (Value::Number(v), Value::Number(t)) => v >= t,
        (Value::Text(v), Value::Text(t)) => v == t,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn table() -> MergedTable {
        MergedTable {
            columns: vec!["UID".into(), "GPA".into(), "Major".into(), "ACT".into(), "SAT".into()],
            rows: vec![
                vec![
                    Value::number(1.0),
                    Value::number(3.9),
                    Value::text("CS"),
                    Value::number(30.0),
                    Value::Absent,
                ],
                vec![
                    Value::number(2.0),
                    Value::number(3.2),
                    Value::text("CS"),
                    Value::Absent,
                    Value::number(1400.0),
                ],
                vec![
                    Value::number(3.0),
                    Value::number(3.8),
                    Value::text("EE"),
                    Value::Absent,
                    Value::Absent,
                ],
            ],
        }
    }

    fn config(thresholds: &[(&str, Value)], groups: &[&[&str]]) -> ScreenConfig {
        ScreenConfig {
            groups: groups
                .iter()
                .map(|g| g.iter().map(|s| s.to_string()).collect())
                .collect(),
            thresholds: thresholds
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn numeric_threshold_is_a_minimum() {
        let out = screen(&table(), &config(&[("GPA", Value::number(3.5))], &[]));
        assert_eq!(out.len(), 2);
        assert_eq!(out.rows[0][0], Value::number(1.0));
        assert_eq!(out.rows[1][0], Value::number(3.0));
    }

    #[test]
    fn text_threshold_is_equality() {
        let out = screen(&table(), &config(&[("Major", Value::text("CS"))], &[]));
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn absent_never_satisfies() {
        let out = screen(&table(), &config(&[("ACT", Value::number(20.0))], &[]));
        assert_eq!(out.len(), 1);
        assert_eq!(out.rows[0][0], Value::number(1.0));
    }

    #[test]
    fn group_passes_on_any_member() {
        let cfg = config(&[("ACT", Value::number(28.0))], &[&["ACT", "SAT"]]);
        let out = screen(&table(), &cfg);
        // Row 1 meets it on ACT directly, row 2 via the SAT alternative,
        // row 3 has no member populated and fails.
        assert_eq!(out.len(), 2);
        assert_eq!(out.rows[0][0], Value::number(1.0));
        assert_eq!(out.rows[1][0], Value::number(2.0));
    }

    #[test]
    fn threshold_for_missing_column_is_ignored() {
        let out = screen(&table(), &config(&[("HS Percentile", Value::number(90.0))], &[]));
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn screening_never_adds_rows() {
        let out = screen(&table(), &config(&[], &[]));
        assert_eq!(out.len(), table().len());
        assert_eq!(out.columns, table().columns);
    }

    #[test]
    fn roles_resolve_once_from_config() {
        let cfg = config(&[("GPA", Value::number(3.0))], &[&["ACT", "SAT"]]);
        assert_eq!(role_of("UID", "UID", &cfg), ColumnRole::Identity);
        assert_eq!(
            role_of("GPA", "UID", &cfg),
            ColumnRole::Criterion(Value::number(3.0))
        );
        assert_eq!(
            role_of("ACT", "UID", &cfg),
            ColumnRole::Group(vec!["ACT".into(), "SAT".into()])
        );
        assert_eq!(role_of("Major", "UID", &cfg), ColumnRole::Free);
    }
}
