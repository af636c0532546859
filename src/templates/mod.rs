//! Templates - HTML page templates, parsed once and rendered per request.
//!
//! Pages are plain HTML with a handful of `{{ }}` tags. Data is any
//! `Serialize` value; it is converted to JSON and templates read from it by
//! field name.
//!
//! ## Syntax
//!
//! - `{{ book.title }}` inserts the HTML-escaped value at a dotted path. Paths
//!   resolve in the innermost `each` item first, then outward. `{{ this }}` is
//!   the innermost item itself. A path with no value is a render error.
//! - `{{#each books}} ... {{/each}}` repeats its body for every array element.
//! - `{{#if books}} ... {{else}} ... {{/if}}` branches on truthiness: missing,
//!   `null`, `false`, `0`, `""`, `[]` and `{}` are false.
//!
//! ## Example
//!
//! ```
//! use bookshelf::Templates;
//! use serde_json::json;
//!
//! let templates = Templates::from_sources([
//!     ("greet", "<p>Hello, {{ name }}!</p>"),
//! ])?;
//! let html = templates.render("greet", &json!({ "name": "<Ada>" }))?;
//! assert_eq!(html, "<p>Hello, &lt;Ada&gt;!</p>");
//! # Ok::<(), bookshelf::TemplateError>(())
//! ```

mod error;
mod parse;
mod render;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Serialize;

pub use error::TemplateError;

use parse::Node;

/// Form for creating a book. Takes no data.
pub const ADD: &str = "add";
/// The book list. Takes `{ "books": [BookEntry] }`.
pub const INDEX: &str = "index";
/// Pre-filled form for one book. Takes a `BookEntry`.
pub const EDIT: &str = "edit";

/// Every template the web layer renders.
pub const REQUIRED: [&str; 3] = [ADD, INDEX, EDIT];

/// A set of parsed templates, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct Templates {
    parsed: HashMap<String, Vec<Node>>,
}

impl Templates {
    /// Load `<dir>/<name>.html` for every name in [`REQUIRED`].
    ///
    /// Fails on the first file that is missing, unreadable, or malformed.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let dir = dir.as_ref();
        let mut templates = Self::default();
        for name in REQUIRED {
            let path = dir.join(format!("{}.html", name));
            let source = fs::read_to_string(&path)
                .map_err(|source| TemplateError::Io { path: path.clone(), source })?;
            templates.insert(name, &source)?;
            tracing::debug!(template = name, path = %path.display(), "loaded template");
        }
        Ok(templates)
    }

    /// Build a template set from in-memory `(name, source)` pairs.
    pub fn from_sources<'a, I>(sources: I) -> Result<Self, TemplateError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut templates = Self::default();
        for (name, source) in sources {
            templates.insert(name, source)?;
        }
        Ok(templates)
    }

    /// Parse and register a template, replacing any previous one of the same name.
    pub fn insert(&mut self, name: &str, source: &str) -> Result<(), TemplateError> {
        let nodes = parse::parse(name, source)?;
        self.parsed.insert(name.to_string(), nodes);
        Ok(())
    }

    /// Whether a template called `name` has been registered.
    pub fn contains(&self, name: &str) -> bool {
        self.parsed.contains_key(name)
    }

    /// Render the named template with `data`.
    pub fn render<T: Serialize + ?Sized>(
        &self,
        name: &str,
        data: &T,
    ) -> Result<String, TemplateError> {
        let nodes = self
            .parsed
            .get(name)
            .ok_or_else(|| TemplateError::Unknown(name.to_string()))?;
        let data = serde_json::to_value(data)?;
        let mut out = String::new();
        render::render(name, nodes, &data, &mut out)?;
        Ok(out)
    }
}
