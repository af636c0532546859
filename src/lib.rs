mod book;
mod config;
mod error;
mod registry;
pub mod templates;
pub mod web;

pub use book::{Book, BookEntry};
pub use config::Config;
pub use error::Error;
pub use registry::BookRegistry;
pub use templates::{TemplateError, Templates};
pub use web::{AppState, WebError};

/// Load templates from `config`, then serve until Ctrl+C.
///
/// Template problems are reported before anything binds, so a broken
/// deployment never starts listening.
pub async fn run(config: Config) -> Result<(), Error> {
    let templates = Templates::load(&config.templates_dir)?;
    tracing::info!(
        dir = %config.templates_dir.display(),
        "loaded {} templates",
        crate::templates::REQUIRED.len()
    );

    let state = AppState::new(BookRegistry::new(), templates, config.public_dir);
    web::serve(state, &config.addr).await?;
    Ok(())
}
