use std::fmt;

#[derive(Debug)]
pub enum AppError {
    /// Missing or unresolvable generation configuration. Blocks the run.
    Config(String),
    /// Unreadable workbook, sheet, or cell content.
    Parse(String),
    /// Asset retrieval failure (network, timeout, bad content type).
    Fetch(String),
    /// Vision service failure (request, status, or response shape).
    Vision(String),
    IoError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Parse(msg) => write!(f, "Parse error: {}", msg),
            AppError::Fetch(msg) => write!(f, "Fetch error: {}", msg),
            AppError::Vision(msg) => write!(f, "Vision error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
