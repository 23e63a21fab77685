// Error type shared by every fallible operation in the crate.
//
// Generation itself cannot fail; errors come from the edges: reading and
// writing files, (de)serializing JSON, rejecting out-of-range notes before
// they reach the player, resolving names typed on the command line, and
// launching the external player process.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EtudeError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: invalid composition JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("note {index}: {reason}")]
    InvalidNote { index: usize, reason: String },

    #[error("tempo must be a positive finite number of beats per minute, got {0}")]
    InvalidTempo(f64),

    #[error("unknown piece '{0}' (try `etude list`)")]
    UnknownPiece(String),

    #[error("unknown chord quality '{0}'")]
    UnknownChordQuality(String),

    #[error("unknown mode '{0}'")]
    UnknownMode(String),

    #[error("failed to launch player '{program}': {source}")]
    PlayerSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("player '{program}' exited with {status}")]
    PlayerFailed { program: String, status: ExitStatus },
}

impl EtudeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EtudeError::Io {
            path: path.into(),
            source,
        }
    }
}
