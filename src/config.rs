use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use crate::error::AlignError;
use crate::model::Value;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct AlignConfig {
    pub name: String,
    pub alignment: AlignmentConfig,
    /// Optional source descriptors, keyed by sheet name. The engine itself
    /// never touches files; this is for the loading collaborator.
    #[serde(default)]
    pub sheets: HashMap<String, SheetSource>,
    #[serde(default)]
    pub screen: Option<ScreenConfig>,
}

// ---------------------------------------------------------------------------
// Alignment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct AlignmentConfig {
    /// Name of the identity column in the merged output.
    pub output_column: String,
    /// Candidate identity columns, in tie-break scan order. May be empty:
    /// nothing aligns then, which is documented behavior rather than an
    /// error.
    #[serde(default)]
    pub columns: Vec<String>,
    /// Sheet names in conflict-resolution preference order. Sheets left out
    /// rank after the listed ones, in input order.
    #[serde(default)]
    pub priority: Vec<String>,
    /// Turn an empty key sequence into an error instead of an empty table.
    #[serde(default)]
    pub strict_keys: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SheetSource {
    pub file: String,
}

// ---------------------------------------------------------------------------
// Screening
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScreenConfig {
    /// Requirement groups: a threshold on any member column is satisfied by
    /// any member.
    #[serde(default)]
    pub groups: Vec<Vec<String>>,
    /// Minimum (numeric) or exact (text) value per column.
    #[serde(default)]
    pub thresholds: BTreeMap<String, Value>,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl AlignConfig {
    pub fn from_toml(input: &str) -> Result<Self, AlignError> {
        let config: AlignConfig =
            toml::from_str(input).map_err(|e| AlignError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AlignError> {
        if self.name.is_empty() {
            return Err(AlignError::ConfigValidation("name must be non-empty".into()));
        }

        let a = &self.alignment;
        if a.output_column.is_empty() {
            return Err(AlignError::ConfigValidation(
                "alignment.output_column must be non-empty".into(),
            ));
        }

        for (i, col) in a.columns.iter().enumerate() {
            if a.columns[..i].contains(col) {
                return Err(AlignError::ConfigValidation(format!(
                    "alignment.columns lists '{col}' twice"
                )));
            }
        }

        for (i, name) in a.priority.iter().enumerate() {
            if a.priority[..i].contains(name) {
                return Err(AlignError::ConfigValidation(format!(
                    "alignment.priority lists '{name}' twice"
                )));
            }
        }

        if let Some(ref screen) = self.screen {
            let mut seen: Vec<&String> = Vec::new();
            for group in &screen.groups {
                for member in group {
                    if seen.contains(&member) {
                        return Err(AlignError::ConfigValidation(format!(
                            "screen.groups lists '{member}' in more than one group"
                        )));
                    }
                    seen.push(member);
                }
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
