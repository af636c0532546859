//! HTTP surface - maps routes to registry operations and renders pages.
//!
//! ## Routes
//!
//! - `GET /`: list every book (`index` template).
//! - `GET /books/add`: empty book form (`add` template).
//! - `POST /books/save`: create a book from form fields, redirect to `/`.
//! - `GET /books/edit/:id`: pre-filled form (`edit` template), 404 if absent.
//! - `POST /books/update/:id`: overwrite a book from form fields, redirect to `/`, 404 if absent.
//! - `POST /books/delete/:id`: delete a book, redirect to `/`, 404 if absent.
//! - `GET /public/*path`: static files from the public directory.
//! - `GET /health`: `OK`.
//!
//! Form fields are `title`, `description` and `author`, sent URL-encoded or as
//! `multipart/form-data`. Any that are missing are taken as empty and the
//! `Content-Type` is never grounds for rejection. Delete is only routed for
//! `POST`.
//!
//! ## Example
//!
//! ```ignore
//! use bookshelf::{web, BookRegistry, Templates};
//!
//! let state = web::AppState::new(
//!     BookRegistry::new(),
//!     Templates::load("templates")?,
//!     "public",
//! );
//! web::serve(state, "0.0.0.0:8080").await?;
//! ```

mod assets;
mod error;
mod form;
mod handlers;

use std::path::PathBuf;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;

use crate::registry::BookRegistry;
use crate::templates::Templates;

pub use error::{WebError, NOT_FOUND_BODY, TEMPLATE_FAILED_BODY};

/// Everything a handler needs, cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<BookRegistry>,
    pub templates: Arc<Templates>,
    pub public_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(
        registry: BookRegistry,
        templates: Templates,
        public_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            registry: Arc::new(registry),
            templates: Arc::new(templates),
            public_dir: Arc::new(public_dir.into()),
        }
    }
}

/// Build the application `Router`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::list_books))
        .route("/books/add", get(handlers::add_book))
        .route("/books/save", post(handlers::save_book))
        .route("/books/edit/:id", get(handlers::edit_book))
        .route("/books/update/:id", post(handlers::update_book))
        .route("/books/delete/:id", post(handlers::delete_book))
        .route("/public/*path", get(assets::serve_asset))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .with_state(state)
}

/// Serve the app on `addr` (e.g. `"0.0.0.0:8080"`) until Ctrl+C.
pub async fn serve(state: AppState, addr: &str) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    serve_on(listener, state).await
}

/// Serve on an already-bound listener until Ctrl+C.
pub async fn serve_on(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("cannot listen for Ctrl+C: {}", e);
        // Without a signal handler, keep serving until the process is killed.
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
