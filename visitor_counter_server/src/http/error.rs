use std::io;
use std::num::ParseIntError;
use std::str::Utf8Error;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("request is not valid utf8: {0}")]
    Utf8(#[from] Utf8Error),
    #[error("unable to parse HTTP message: {0}")]
    Format(String),
    #[error("HTTP message in buffer is incomplete")]
    Incomplete,
    #[error("stream is closed")]
    Closed,
}

impl Error {
    pub fn format_error(msg: impl Into<String>) -> Self {
        Error::Format(msg.into())
    }
}

impl From<ParseIntError> for Error {
    fn from(value: ParseIntError) -> Self {
        Error::Format(value.to_string())
    }
}
