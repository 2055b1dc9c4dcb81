//! `sheetalign` — multi-sheet tabular alignment and merge engine.
//!
//! Pure engine crate: receives pre-loaded sheets, returns a merged table and
//! per-key conflict reports. No UI or storage dependencies.

pub mod align;
pub mod combine;
pub mod config;
pub mod conflict;
pub mod engine;
pub mod error;
pub mod merge;
pub mod model;
pub mod screen;
pub mod sheet;
pub mod summary;

pub use align::resolve;
pub use combine::combine_columns;
pub use config::AlignConfig;
pub use conflict::detect_conflicts;
pub use engine::run;
pub use error::AlignError;
pub use merge::merge;
pub use model::{AlignInput, AlignResult, ConflictReport, Match, MergedTable, Value};
pub use sheet::Sheet;
