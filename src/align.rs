use crate::model::{Match, Value};
use crate::sheet::Sheet;

/// Locate, per sheet, the unique row identified by `key`.
///
/// Alignment columns are scanned in the caller-supplied order and the first
/// column holding `key` exactly once wins; the sheet is then done (a sheet
/// never contributes two matches for one key). A column holding the key twice
/// or more is ambiguous for this key and is skipped, never selected. Sheets
/// where no column yields a unique hit contribute nothing.
///
/// Output order = input sheet order, at most one match per sheet. An empty
/// `alignment_columns` slice matches nothing; that is documented behavior,
/// not an error.
pub fn resolve(alignment_columns: &[String], key: &Value, sheets: &[Sheet]) -> Vec<Match> {
    let mut matches = Vec::new();

    for sheet in sheets {
        for column in alignment_columns {
            if !sheet.has_column(column) {
                continue;
            }
            match sheet.count_in_column(column, key) {
                1 => {
                    // find_in_column cannot miss here: the count was 1.
                    if let Some(row) = sheet.find_in_column(column, key) {
                        matches.push(Match {
                            sheet: sheet.name().to_string(),
                            row: row.clone(),
                        });
                    }
                    break;
                }
                // 0 = not here, >=2 = ambiguous; either way try the next column.
                _ => continue,
            }
        }
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn sheets() -> Vec<Sheet> {
        vec![
            Sheet::from_csv("a", "ID,GPA\n1,3.5\n2,3.7\n").unwrap(),
            Sheet::from_csv("b", "StudentID,Major\n1,CS\n3,EE\n").unwrap(),
        ]
    }

    #[test]
    fn resolves_across_differently_named_columns() {
        let matches = resolve(&cols(&["ID", "StudentID"]), &Value::number(1.0), &sheets());
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].sheet, "a");
        assert_eq!(matches[0].row["GPA"], Value::number(3.5));
        assert_eq!(matches[1].sheet, "b");
        assert_eq!(matches[1].row["Major"], Value::text("CS"));
    }

    #[test]
    fn at_most_one_match_per_sheet() {
        // Both ID and StudentID hold 1 exactly once; first column wins and the
        // sheet still contributes a single match.
        let sheet = Sheet::from_csv("a", "ID,StudentID,GPA\n1,1,3.5\n").unwrap();
        let matches = resolve(&cols(&["ID", "StudentID"]), &Value::number(1.0), &[sheet]);
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn duplicate_key_makes_column_ambiguous() {
        let sheet = Sheet::from_csv("a", "ID,GPA\n1,3.5\n1,3.9\n").unwrap();
        let matches = resolve(&cols(&["ID"]), &Value::number(1.0), &[sheet]);
        assert!(matches.is_empty());
    }

    #[test]
    fn ambiguous_column_falls_through_to_next() {
        // ID holds 1 twice (skipped), StudentID holds it once (selected).
        let sheet = Sheet::from_csv("a", "ID,StudentID,GPA\n1,1,3.5\n1,9,3.9\n").unwrap();
        let matches = resolve(&cols(&["ID", "StudentID"]), &Value::number(1.0), &[sheet]);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].row["GPA"], Value::number(3.5));
    }

    #[test]
    fn empty_alignment_columns_match_nothing() {
        let matches = resolve(&[], &Value::number(1.0), &sheets());
        assert!(matches.is_empty());
    }

    #[test]
    fn unmatched_key_contributes_nothing() {
        let matches = resolve(&cols(&["ID", "StudentID"]), &Value::number(99.0), &sheets());
        assert!(matches.is_empty());
    }

    #[test]
    fn absent_key_never_matches() {
        let sheet = Sheet::from_csv("a", "ID,GPA\n,3.5\n").unwrap();
        let matches = resolve(&cols(&["ID"]), &Value::Absent, &[sheet]);
        assert!(matches.is_empty());
    }

    #[test]
    fn output_follows_sheet_order() {
        let mut sh = sheets();
        sh.reverse();
        let matches = resolve(&cols(&["ID", "StudentID"]), &Value::number(1.0), &sh);
        assert_eq!(matches[0].sheet, "b");
        assert_eq!(matches[1].sheet, "a");
    }
}
