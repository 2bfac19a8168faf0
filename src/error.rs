//! Error taxonomy for the parse layer.
//!
//! Only `Decode`, `Io` and `Pattern` ever reach the caller of the pipeline.
//! `MalformedTimestamp` is produced per entry and absorbed into the
//! [`IngestReport`](crate::IngestReport) counts.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("chat export is not valid UTF-8: {0}")]
    Decode(#[from] std::str::Utf8Error),

    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no configured date format matches timestamp {raw:?}")]
    MalformedTimestamp { raw: String },

    #[error("invalid timestamp anchor pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type ChatResult<T> = std::result::Result<T, ChatError>;
