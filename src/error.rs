use std::ffi::NulError;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The shared library could not be opened.
    #[error("failed to load solver library {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    /// A required entry point is not exported by the library.
    #[error("solver library does not export {name}: {source}")]
    MissingSymbol {
        name: &'static str,
        #[source]
        source: libloading::Error,
    },

    /// `init` returned a null handle.
    #[error("solver library failed to allocate a solver (null handle)")]
    NullHandle,

    #[error("solve returned undefined status code {0}")]
    UnexpectedStatus(i32),

    #[error("value({var}) returned {raw}, expected {var}, -{var} or 0")]
    UnexpectedValue { var: u32, raw: i32 },

    #[error("invalid literal {0}")]
    InvalidLiteral(i64),

    #[error("solve called while a clause is still open (missing terminating 0)")]
    UnterminatedClause,

    #[error("solver has already been solved once")]
    AlreadySolved,

    #[error("no model available: last result was not satisfiable")]
    NoModel,

    #[error("options must be set before the first literal is added")]
    OptionsLocked,

    #[error("{0} is not supported by this solver")]
    Unsupported(&'static str),

    #[error("option name contains an interior NUL byte")]
    OptionName(#[from] NulError),

    /// The returned model falsifies a clause (0-based index).
    #[error("model does not satisfy clause {clause}")]
    ModelCheck { clause: usize },

    #[error("dimacs line {line}: {message}")]
    Dimacs { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn dimacs(line: usize, message: impl Into<String>) -> Self {
        Self::Dimacs {
            line,
            message: message.into(),
        }
    }
}
