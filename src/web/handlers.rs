use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;

use super::error::{WebError, NOT_FOUND_BODY};
use super::form::BookForm;
use super::AppState;
use crate::book::BookEntry;
use crate::templates;

/// Data for the `index` template.
#[derive(Serialize)]
struct IndexPage {
    books: Vec<BookEntry>,
}

/// `302 Found` back to the book list.
fn redirect_home() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response()
}

/// `GET /`
pub(super) async fn list_books(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    let page = IndexPage {
        books: state.registry.list(),
    };
    Ok(Html(state.templates.render(templates::INDEX, &page)?))
}

/// `GET /books/add`
pub(super) async fn add_book(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    Ok(Html(state.templates.render(templates::ADD, &())?))
}

/// `POST /books/save`
pub(super) async fn save_book(
    State(state): State<AppState>,
    BookForm(book): BookForm,
) -> Response {
    state.registry.create(book);
    redirect_home()
}

/// `GET /books/edit/:id`
pub(super) async fn edit_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, WebError> {
    let book = state
        .registry
        .get(&id)
        .ok_or_else(|| WebError::BookNotFound(id.clone()))?;
    let entry = BookEntry::new(id, book);
    Ok(Html(state.templates.render(templates::EDIT, &entry)?))
}

/// `POST /books/update/:id`
pub(super) async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    BookForm(book): BookForm,
) -> Result<Response, WebError> {
    if !state.registry.update(&id, book) {
        return Err(WebError::BookNotFound(id));
    }
    Ok(redirect_home())
}

/// `POST /books/delete/:id`
pub(super) async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    if !state.registry.delete(&id) {
        return Err(WebError::BookNotFound(id));
    }
    Ok(redirect_home())
}

/// `GET /health`
pub(super) async fn health() -> &'static str {
    "OK"
}

/// Any route not matched above.
pub(super) async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, NOT_FOUND_BODY)
}
