//! Error Types.
//!
//! The pipeline tracker itself is total and never fails. Errors only arise
//! at the edges of the crate: reading configuration and trace files, parsing
//! stage mnemonics, and replaying a trace that refers to instructions or
//! markers it does not define.

use std::fmt;
use std::path::PathBuf;

use crate::core::pipeline::Stage;

/// Errors produced while loading or replaying simulator inputs.
#[derive(Debug)]
pub enum Error {
    /// A configuration or trace file could not be read.
    Io {
        /// Path of the file that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration or trace file was not valid TOML for its schema.
    Parse {
        /// Path of the offending file, or `<inline>` for in-memory sources.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },

    /// A stage mnemonic did not name one of IF, ID, EX, MEM, WB.
    UnknownStage(String),

    /// A trace cycle referenced an instruction index outside its program.
    UnknownInstruction {
        /// Zero-based cycle number in the trace.
        cycle: usize,
        /// The out-of-range index.
        index: u32,
    },

    /// A trace cycle assigned the same stage more than once.
    DuplicateStage {
        /// Zero-based cycle number in the trace.
        cycle: usize,
        /// The stage named twice.
        stage: Stage,
    },

    /// A trace cycle used a slot marker other than `bubble` or `empty`.
    UnknownMarker {
        /// Zero-based cycle number in the trace.
        cycle: usize,
        /// The unrecognized marker text.
        marker: String,
    },
}

impl Error {
    pub(crate) fn parse(path: impl Into<PathBuf>, err: impl fmt::Display) -> Self {
        Error::Parse {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for Error {
    /// Formats the error for display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            Error::Parse { path, message } => {
                write!(f, "failed to parse {}: {}", path.display(), message)
            }
            Error::UnknownStage(name) => write!(f, "unknown pipeline stage '{}'", name),
            Error::UnknownInstruction { cycle, index } => write!(
                f,
                "cycle {}: instruction index {} is not part of the program",
                cycle, index
            ),
            Error::DuplicateStage { cycle, stage } => {
                write!(f, "cycle {}: stage {} is assigned more than once", cycle, stage)
            }
            Error::UnknownMarker { cycle, marker } => write!(
                f,
                "cycle {}: unknown slot marker '{}' (expected 'bubble' or 'empty')",
                cycle, marker
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
