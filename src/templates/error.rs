//! Error types for loading and rendering templates.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Error type for template operations.
#[derive(Debug)]
pub enum TemplateError {
    /// A template file could not be read.
    Io { path: PathBuf, source: io::Error },
    /// Template source is malformed. `offset` is a byte offset into the source.
    Parse {
        name: String,
        offset: usize,
        message: String,
    },
    /// No template registered under this name.
    Unknown(String),
    /// A `{{ path }}` placeholder had nothing to substitute.
    MissingValue { template: String, path: String },
    /// The data handed to `render` could not be serialized.
    Data(String),
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::Io { path, source } => {
                write!(f, "cannot read template {}: {}", path.display(), source)
            }
            TemplateError::Parse {
                name,
                offset,
                message,
            } => write!(f, "template {} at byte {}: {}", name, offset, message),
            TemplateError::Unknown(name) => write!(f, "template not found: {}", name),
            TemplateError::MissingValue { template, path } => {
                write!(f, "template {}: no value for {}", template, path)
            }
            TemplateError::Data(msg) => write!(f, "template data error: {}", msg),
        }
    }
}

impl Error for TemplateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TemplateError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TemplateError {
    fn from(err: serde_json::Error) -> Self {
        TemplateError::Data(err.to_string())
    }
}
