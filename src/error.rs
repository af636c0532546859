use std::error::Error as StdError;
use std::fmt;
use std::io;

use crate::templates::TemplateError;

/// Reasons the server cannot start or keep running.
#[derive(Debug)]
pub enum Error {
    /// Templates could not be loaded; nothing can be rendered.
    Templates(TemplateError),
    /// Binding or serving failed.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Templates(e) => write!(f, "cannot load templates: {}", e),
            Error::Io(e) => write!(f, "server error: {}", e),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Templates(e) => Some(e),
            Error::Io(e) => Some(e),
        }
    }
}

impl From<TemplateError> for Error {
    fn from(err: TemplateError) -> Self {
        Error::Templates(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}
