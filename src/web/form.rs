//! Lenient book form extraction.
//!
//! Any POST body is accepted. `multipart/form-data` bodies are read part by
//! part; every other body is decoded as `application/x-www-form-urlencoded`
//! whatever its `Content-Type` says. The first value of a repeated field wins,
//! and fields that are absent, or that a broken body never got to, are empty.

use std::convert::Infallible;

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header;

use crate::book::Book;

/// A [`Book`] read from the request body. Never rejects.
pub(super) struct BookForm(pub Book);

#[async_trait]
impl<S: Send + Sync> FromRequest<S> for BookForm {
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut fields = Fields::default();

        if is_multipart(&req) {
            match Multipart::from_request(req, state).await {
                Ok(mut multipart) => read_multipart(&mut multipart, &mut fields).await,
                Err(rejection) => tracing::debug!("unreadable multipart form: {}", rejection),
            }
        } else {
            match Bytes::from_request(req, state).await {
                Ok(body) => fields.extend_urlencoded(&body),
                Err(rejection) => tracing::debug!("unreadable form body: {}", rejection),
            }
        }

        Ok(Self(fields.into_book()))
    }
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|ct| {
            ct.trim_start()
                .to_ascii_lowercase()
                .starts_with("multipart/form-data")
        })
}

/// Reads text parts until the body ends or stops parsing. File parts are skipped.
async fn read_multipart(multipart: &mut Multipart, fields: &mut Fields) {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::debug!("multipart form cut short: {}", e);
                break;
            }
        };
        if field.file_name().is_some() {
            continue;
        }
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        match field.text().await {
            Ok(value) => fields.set(&name, value),
            Err(e) => {
                tracing::debug!("multipart field {} unreadable: {}", name, e);
                break;
            }
        }
    }
}

#[derive(Debug, Default)]
struct Fields {
    title: Option<String>,
    description: Option<String>,
    author: Option<String>,
}

impl Fields {
    fn set(&mut self, name: &str, value: String) {
        let slot = match name {
            "title" => &mut self.title,
            "description" => &mut self.description,
            "author" => &mut self.author,
            _ => return,
        };
        slot.get_or_insert(value);
    }

    fn extend_urlencoded(&mut self, body: &[u8]) {
        for (name, value) in form_urlencoded::parse(body) {
            self.set(&name, value.into_owned());
        }
    }

    fn into_book(self) -> Book {
        Book {
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            author: self.author.unwrap_or_default(),
        }
    }
}
