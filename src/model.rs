use std::collections::BTreeMap;
use std::fmt;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::AlignError;
use crate::sheet::Sheet;

// ---------------------------------------------------------------------------
// Value
// ---------------------------------------------------------------------------

/// A single cell value. Exact-match comparable: `Eq + Ord + Hash` so values can
/// be counted and combined as sets. Numbers wrap [`OrderedFloat`] for that.
///
/// Serializes untagged: `Absent` is `null`, the rest are plain scalars.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Absent,
    Number(OrderedFloat<f64>),
    Text(String),
}

impl Default for Value {
    fn default() -> Self {
        Value::Absent
    }
}

impl Value {
    /// Parse a raw cell string: empty → Absent, numeric → Number, else Text.
    pub fn from_input(input: &str) -> Self {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Value::Absent;
        }

        if let Ok(num) = trimmed.parse::<f64>() {
            return Value::Number(OrderedFloat(num));
        }

        Value::Text(trimmed.to_string())
    }

    pub fn number(n: f64) -> Self {
        Value::Number(OrderedFloat(n))
    }

    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.0),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => Ok(()),
            Value::Number(n) => {
                if n.0.fract() == 0.0 && n.0.abs() < 1e15 {
                    write!(f, "{}", n.0 as i64)
                } else {
                    write!(f, "{}", n.0)
                }
            }
            Value::Text(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Match
// ---------------------------------------------------------------------------

/// The row of one sheet selected as representing a given alignment key.
/// A sheet contributes at most one Match per key.
#[derive(Debug, Clone)]
pub struct Match {
    pub sheet: String,
    pub row: BTreeMap<String, Value>,
}

// ---------------------------------------------------------------------------
// Conflict report
// ---------------------------------------------------------------------------

/// Column → (sheet → value), populated only for columns that carry a value in
/// two or more matched rows for the same key. The values may be identical
/// across sheets; the report surfaces multiplicity and leaves comparison to
/// the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConflictReport {
    pub columns: BTreeMap<String, BTreeMap<String, Value>>,
}

impl ConflictReport {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }
}

/// Conflicts for one alignment key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyConflicts {
    pub key: Value,
    pub report: ConflictReport,
}

// ---------------------------------------------------------------------------
// Merged table
// ---------------------------------------------------------------------------

/// Dense merged output: every row is exactly as wide as `columns`, missing
/// data is an explicit [`Value::Absent`], never an omitted cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl MergedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let col = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[col])
    }

    /// Render as headered CSV text for the export collaborator.
    pub fn to_csv(&self) -> Result<String, AlignError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(&self.columns)
            .map_err(|e| AlignError::Io(e.to_string()))?;
        for row in &self.rows {
            let record: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            writer
                .write_record(&record)
                .map_err(|e| AlignError::Io(e.to_string()))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| AlignError::Io(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| AlignError::Io(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Engine input + output
// ---------------------------------------------------------------------------

/// Pre-loaded sheets plus the key sequence to reconcile. When `keys` is None
/// the engine derives the sequence itself (first occurrence of every value in
/// any alignment column, in sheet order).
pub struct AlignInput {
    pub sheets: Vec<Sheet>,
    pub keys: Option<Vec<Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignSummary {
    pub keys_total: usize,
    pub keys_matched: usize,
    pub keys_unmatched: usize,
    pub conflicted_keys: usize,
    pub conflicted_columns: usize,
    pub absent_cells: usize,
    pub rows_emitted: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlignMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlignResult {
    pub meta: AlignMeta,
    pub summary: AlignSummary,
    pub table: MergedTable,
    pub conflicts: Vec<KeyConflicts>,
}

impl AlignResult {
    pub fn to_json(&self) -> Result<String, AlignError> {
        serde_json::to_string_pretty(self).map_err(|e| AlignError::Io(e.to_string()))
    }
}
