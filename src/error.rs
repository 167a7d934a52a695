use crate::core::svtype::SvType;
use std::{num::ParseIntError, path::PathBuf};
use thiserror::Error;

pub type SvqResult<T> = std::result::Result<T, SvqError>;

#[derive(Debug, Error)]
pub enum SvqError {
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    ParseInt(#[from] ParseIntError),
    #[error("{message}")]
    Usage { message: String },
    #[error("Failed to load evidence index {}: {message}", path.display())]
    IndexLoad { path: PathBuf, message: String },
    #[error("SV type {sv_type} is not yet supported")]
    UnsupportedSvType { sv_type: SvType },
    #[error("Unknown SV type: {value}")]
    UnknownSvType { value: String },
    #[error("Malformed evidence record ({reason}): {line}")]
    MalformedRecord { reason: String, line: String },
    #[error("Invalid gzip header: {}", path.display())]
    InvalidGzipHeader { path: PathBuf },
}

impl SvqError {
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }

    /// Process exit status for this error; malformed user input gets the
    /// conventional usage status, everything else a generic failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            SvqError::Usage { .. } => 64,
            _ => 1,
        }
    }
}

#[macro_export]
macro_rules! svq_error {
    ($($arg:tt)*) => {
        $crate::error::SvqError::message(format!($($arg)*))
    };
}
