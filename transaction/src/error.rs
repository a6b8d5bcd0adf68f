use crate::headers::ValueKind;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Malformed input: {0}")]
    MalformedInput(#[source] serde_json::Error),
    #[error("Unsupported value shape for header \"{name}\": {kind}")]
    UnsupportedHeaderValueShape { name: String, kind: ValueKind },
    #[error("Header \"{name}\" has {count} values, the limit is {limit}")]
    TooManyHeaderValues {
        name: String,
        count: usize,
        limit: usize,
    },
    #[error("Couldn't encode transaction: {0}")]
    EncodeError(#[source] serde_json::Error),
    #[error("IoError: {0}")]
    IoError(#[from] io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::MalformedInput(e)
    }
}
