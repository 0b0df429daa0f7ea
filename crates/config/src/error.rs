use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// JSON parse / deserialization error.
    Parse(String),
    /// IO error (file read, write, etc.).
    Io(String),
    /// A column definition is inconsistent (e.g. an unsupported decimal separator).
    InvalidColumn { index: usize, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::InvalidColumn { index, reason } => write!(f, "column {index}: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}
