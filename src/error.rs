use std::fmt;

#[derive(Debug)]
pub enum AlignError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty name, duplicate priority entry, etc.).
    ConfigValidation(String),
    /// Malformed input table (non-rectangular row, bad header, empty name).
    InvalidSheet { sheet: String, detail: String },
    /// Two sheets in one call share a name.
    DuplicateSheet(String),
    /// A priority entry names a sheet that was not supplied.
    UnknownSheet(String),
    /// An operation that needs at least one input got none.
    EmptyInput(String),
    /// Strict-mode merge called with no keys.
    EmptyKeySequence,
    /// IO error (CSV read/write, etc.).
    Io(String),
}

impl fmt::Display for AlignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::InvalidSheet { sheet, detail } => {
                write!(f, "invalid sheet '{sheet}': {detail}")
            }
            Self::DuplicateSheet(name) => write!(f, "duplicate sheet name: '{name}'"),
            Self::UnknownSheet(name) => write!(f, "unknown sheet: '{name}'"),
            Self::EmptyInput(what) => write!(f, "empty input: {what}"),
            Self::EmptyKeySequence => write!(f, "key sequence is empty"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for AlignError {}
