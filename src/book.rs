use serde::{Deserialize, Serialize};

/// A book record. Fields are free text; empty strings are allowed.
///
/// Any field missing from a deserialized payload is an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Book {
    pub title: String,
    pub description: String,
    pub author: String,
}

impl Book {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            author: author.into(),
        }
    }
}

/// A book paired with the identifier the registry assigned to it.
///
/// Serializes flat: `{ "id": "3", "title": ..., "description": ..., "author": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookEntry {
    pub id: String,
    #[serde(flatten)]
    pub book: Book,
}

impl BookEntry {
    pub fn new(id: impl Into<String>, book: Book) -> Self {
        Self {
            id: id.into(),
            book,
        }
    }
}
