use std::fmt;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (threshold out of range, empty column name, etc.).
    ConfigValidation(String),
    /// Missing required column in an input table.
    MissingColumn { table: String, column: String },
    /// Delimited text could not be read as a table.
    TableParse(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingColumn { table, column } => {
                write!(f, "{table}: missing column '{column}'")
            }
            Self::TableParse(msg) => write!(f, "table parse error: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}
