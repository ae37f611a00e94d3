use crate::codes;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias for the snapshot pipeline.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every way a snapshot run can fail.
///
/// All of these are fatal for the run; the binary turns them into a
/// diagnostic and a non-zero exit status.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to open '{path}': {source}")]
    ScriptOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read '{path}': {source}")]
    ScriptRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to open file \"{path}\" for writing: {source}")]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Writing \"{path}\" failed: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Writing snapshot file failed: wrote {written} of {expected} bytes to \"{path}\"")]
    Truncated {
        path: PathBuf,
        written: usize,
        expected: usize,
    },

    #[error("Snapshot engine returned an empty blob")]
    EmptySnapshot,

    #[error("Snapshot engine failed during {stage}: {message}")]
    Engine { stage: &'static str, message: String },

    #[error("No snapshot engine is compiled in (rebuild with the `v8` feature)")]
    EngineUnavailable,
}

impl Error {
    #[must_use]
    pub fn engine(stage: &'static str, message: impl Into<String>) -> Self {
        Self::Engine {
            stage,
            message: message.into(),
        }
    }

    /// Stable SCREAMING_SNAKE_CASE code for machine-readable output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::ScriptOpen { .. } => codes::SCRIPT_OPEN_FAILED,
            Self::ScriptRead { .. } => codes::SCRIPT_READ_FAILED,
            Self::OutputOpen { .. } => codes::OUTPUT_OPEN_FAILED,
            Self::OutputWrite { .. } => codes::OUTPUT_WRITE_FAILED,
            Self::Truncated { .. } => codes::OUTPUT_TRUNCATED,
            Self::EmptySnapshot => codes::SNAPSHOT_EMPTY,
            Self::Engine { .. } => codes::ENGINE_FAILED,
            Self::EngineUnavailable => codes::ENGINE_UNAVAILABLE,
        }
    }
}
