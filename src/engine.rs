use std::collections::BTreeSet;

use crate::align::resolve;
use crate::config::AlignConfig;
use crate::conflict::conflicts_in;
use crate::error::AlignError;
use crate::merge::merge;
use crate::model::{AlignInput, AlignMeta, AlignResult, KeyConflicts, Value};
use crate::screen::screen;
use crate::sheet::Sheet;
use crate::summary::compute_summary;

/// Run a full alignment per config: merge all keys, collect per-key conflict
/// reports, apply screening, and wrap everything with meta + summary.
pub fn run(config: &AlignConfig, input: &AlignInput) -> Result<AlignResult, AlignError> {
    validate_sheets(&input.sheets)?;

    let a = &config.alignment;
    let keys = match &input.keys {
        Some(keys) => keys.clone(),
        None => collect_keys(&a.columns, &input.sheets),
    };

    let table = merge(
        &a.output_column,
        &a.columns,
        &keys,
        &input.sheets,
        &a.priority,
        a.strict_keys,
    )?;

    let mut keys_matched = 0;
    let mut conflicts = Vec::new();
    for key in &keys {
        let matches = resolve(&a.columns, key, &input.sheets);
        if !matches.is_empty() {
            keys_matched += 1;
        }
        let report = conflicts_in(&matches, &a.columns);
        if !report.is_empty() {
            conflicts.push(KeyConflicts {
                key: key.clone(),
                report,
            });
        }
    }

    let emitted = match &config.screen {
        Some(screen_config) => screen(&table, screen_config),
        None => table.clone(),
    };

    let summary = compute_summary(&keys, keys_matched, &table, &conflicts, emitted.len());

    Ok(AlignResult {
        meta: AlignMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        table: emitted,
        conflicts,
    })
}

/// Derive the key sequence when the caller supplies none: every non-absent
/// value seen in any alignment column, in first-occurrence order across
/// sheets and rows.
pub fn collect_keys(alignment_columns: &[String], sheets: &[Sheet]) -> Vec<Value> {
    let mut keys = Vec::new();
    let mut seen = BTreeSet::new();

    for sheet in sheets {
        for row in sheet.rows() {
            for column in alignment_columns {
                match row.get(column) {
                    Some(value) if !value.is_absent() => {
                        if seen.insert(value.clone()) {
                            keys.push(value.clone());
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    keys
}

fn validate_sheets(sheets: &[Sheet]) -> Result<(), AlignError> {
    let mut seen = BTreeSet::new();
    for sheet in sheets {
        if !seen.insert(sheet.name()) {
            return Err(AlignError::DuplicateSheet(sheet.name().to_string()));
        }
    }
    Ok(())
}
