use std::fmt;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// Raster asset could not be decoded. Furniture treats this as recoverable.
    Image(String),
    /// `set_page` was asked for a page the surface does not have (1-based).
    PageOutOfRange { requested: usize, count: usize },
    InvalidInput(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "io error: {err}"),
            Error::Json(err) => write!(f, "invalid JSON input: {err}"),
            Error::Image(message) => write!(f, "image decode failed: {message}"),
            Error::PageOutOfRange { requested, count } => {
                write!(f, "page {requested} out of range (document has {count} pages)")
            }
            Error::InvalidInput(message) => write!(f, "invalid input: {message}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Io(value)
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::Json(value)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
