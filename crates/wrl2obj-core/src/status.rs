use thiserror::Error;

/// Errors raised while converting a WRL document.
///
/// Every variant aborts the whole conversion; nothing is retried and no
/// partial output is considered valid.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WrlError {
    /// The input text does not match the WRL grammar.
    #[error("Syntax error at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },
    /// The document parsed but its topology cannot be emitted as-is.
    #[error("Structural error: {0}")]
    Structural(String),
    #[error("IO error: {0}")]
    Io(String),
}

pub type StatusResult<T> = Result<T, WrlError>;

impl WrlError {
    pub fn syntax(line: usize, column: usize, message: impl Into<String>) -> Self {
        WrlError::Syntax {
            line,
            column,
            message: message.into(),
        }
    }

    pub fn structural(message: impl Into<String>) -> Self {
        WrlError::Structural(message.into())
    }

    /// Returns true for grammar mismatches.
    pub fn is_syntax(&self) -> bool {
        matches!(self, WrlError::Syntax { .. })
    }
}

impl From<std::io::Error> for WrlError {
    fn from(err: std::io::Error) -> Self {
        WrlError::Io(err.to_string())
    }
}
