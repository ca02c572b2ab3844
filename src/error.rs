use std::{io, time::Duration};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to launch engine `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("engine `{program}` terminated without an exit code")]
    Crashed { program: String },
    #[error("engine `{program}` did not finish within {timeout:?}")]
    Timeout { program: String, timeout: Duration },
    #[error("malformed game result: {0}")]
    Parse(String),
    #[error("agent `{0}` is not part of the ranking table")]
    Aggregation(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
