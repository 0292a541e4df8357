use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum D2Error {
    #[error("Failed to read object lookup table")]
    TableRead(#[source] csv::Error),
    #[error("Object lookup table row {line} is not valid UTF-8")]
    TableEncoding { line: u64 },

    #[error("Unknown composite layer {0}")]
    LayerName(Box<str>),
    #[error("Unknown object type {0}")]
    ObjectType(i32),

    #[error(transparent)]
    IO(io::Error),
}

impl From<csv::Error> for D2Error {
    fn from(source: csv::Error) -> Self {
        let line = source.position().map(|p| p.line()).unwrap_or_default();
        match source.kind() {
            csv::ErrorKind::Utf8 { .. } => Self::TableEncoding { line },
            _ => Self::TableRead(source),
        }
    }
}
