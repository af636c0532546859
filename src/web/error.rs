//! Errors surfaced at the HTTP boundary.

use std::error::Error;
use std::fmt;
use std::io;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::templates::TemplateError;

/// Body sent with every 404.
pub const NOT_FOUND_BODY: &str = "404 page not found";
/// Body sent when a page cannot be rendered.
pub const TEMPLATE_FAILED_BODY: &str = "Error in executing template";

/// Error type for request handlers.
#[derive(Debug)]
pub enum WebError {
    /// No book with this identifier.
    BookNotFound(String),
    /// No static asset at this path.
    AssetNotFound(String),
    /// A page failed to render.
    Template(TemplateError),
    /// Reading a static asset failed for a reason other than absence.
    Asset { path: String, source: io::Error },
}

impl WebError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebError::BookNotFound(_) | WebError::AssetNotFound(_) => StatusCode::NOT_FOUND,
            WebError::Template(_) | WebError::Asset { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebError::BookNotFound(id) => write!(f, "book not found: {}", id),
            WebError::AssetNotFound(path) => write!(f, "asset not found: {}", path),
            WebError::Template(e) => write!(f, "template error: {}", e),
            WebError::Asset { path, source } => {
                write!(f, "cannot read asset {}: {}", path, source)
            }
        }
    }
}

impl Error for WebError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WebError::Template(e) => Some(e),
            WebError::Asset { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<TemplateError> for WebError {
    fn from(err: TemplateError) -> Self {
        WebError::Template(err)
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            WebError::BookNotFound(_) | WebError::AssetNotFound(_) => {
                tracing::debug!("{}", self);
                NOT_FOUND_BODY
            }
            WebError::Template(_) => {
                tracing::error!("{}", self);
                TEMPLATE_FAILED_BODY
            }
            WebError::Asset { .. } => {
                tracing::error!("{}", self);
                "Internal Server Error"
            }
        };
        (status, body).into_response()
    }
}
