use std::collections::BTreeMap;

use crate::error::AlignError;
use crate::model::Value;

/// An immutable named table: a declared column set plus an ordered sequence
/// of rows. Rows may leave declared columns out (read back as absent) but may
/// never carry a column outside the declared set.
///
/// The engine only reads sheets; construction is the one place invariants are
/// checked.
#[derive(Debug, Clone)]
pub struct Sheet {
    name: String,
    columns: Vec<String>,
    rows: Vec<BTreeMap<String, Value>>,
}

impl Sheet {
    pub fn new(
        name: impl Into<String>,
        columns: Vec<String>,
        rows: Vec<BTreeMap<String, Value>>,
    ) -> Result<Self, AlignError> {
        let name = name.into();
        if name.is_empty() {
            return Err(AlignError::InvalidSheet {
                sheet: name,
                detail: "sheet name must be non-empty".into(),
            });
        }

        let mut seen = BTreeMap::new();
        for col in &columns {
            if seen.insert(col.clone(), ()).is_some() {
                return Err(AlignError::InvalidSheet {
                    sheet: name,
                    detail: format!("duplicate column '{col}'"),
                });
            }
        }

        for (i, row) in rows.iter().enumerate() {
            for col in row.keys() {
                if !seen.contains_key(col) {
                    return Err(AlignError::InvalidSheet {
                        sheet: name,
                        detail: format!("row {i} has undeclared column '{col}'"),
                    });
                }
            }
        }

        Ok(Sheet { name, columns, rows })
    }

    /// Build a sheet from headered CSV text. Every cell goes through
    /// [`Value::from_input`], so blanks come back as [`Value::Absent`].
    pub fn from_csv(name: impl Into<String>, csv_data: &str) -> Result<Self, AlignError> {
        let name = name.into();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(csv_data.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| AlignError::Io(e.to_string()))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| AlignError::Io(e.to_string()))?;
            let mut row = BTreeMap::new();
            for (i, header) in headers.iter().enumerate() {
                let cell = record.get(i).unwrap_or("");
                row.insert(header.clone(), Value::from_input(cell));
            }
            rows.push(row);
        }

        Sheet::new(name, headers, rows)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[BTreeMap<String, Value>] {
        &self.rows
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// How many rows hold `value` in `column`. Columns a row leaves out never
    /// count, and neither do absent cells (an absent key identifies nothing).
    pub fn count_in_column(&self, column: &str, value: &Value) -> usize {
        if value.is_absent() {
            return 0;
        }
        self.rows
            .iter()
            .filter(|row| row.get(column) == Some(value))
            .count()
    }

    /// The first row holding `value` in `column`, if any.
    pub fn find_in_column(&self, column: &str, value: &Value) -> Option<&BTreeMap<String, Value>> {
        if value.is_absent() {
            return None;
        }
        self.rows.iter().find(|row| row.get(column) == Some(value))
    }
}
