//! Static files under `/public/*`.

use std::io;
use std::path::{Component, Path as FsPath, PathBuf};

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use super::error::WebError;
use super::AppState;

/// `GET /public/*path`
///
/// Symlinks inside the public directory are followed, but only to targets
/// that are themselves under it.
pub(super) async fn serve_asset(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Response, WebError> {
    let Some(file) = resolve(&state.public_dir, &path) else {
        return Err(WebError::AssetNotFound(path));
    };

    let file = match canonical_within(&state.public_dir, &file).await {
        Ok(Some(file)) => file,
        Ok(None) => return Err(WebError::AssetNotFound(path)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(WebError::AssetNotFound(path))
        }
        Err(source) => return Err(WebError::Asset { path, source }),
    };

    match tokio::fs::metadata(&file).await {
        Ok(meta) if meta.is_dir() => return Err(WebError::AssetNotFound(path)),
        Ok(_) => {}
        Err(source) => return Err(WebError::Asset { path, source }),
    }

    let bytes = match tokio::fs::read(&file).await {
        Ok(bytes) => bytes,
        Err(source) => return Err(WebError::Asset { path, source }),
    };

    Ok(([(header::CONTENT_TYPE, content_type(&file))], bytes).into_response())
}

/// Canonical form of `file`, or `None` if it lies outside canonical `root`.
async fn canonical_within(root: &FsPath, file: &FsPath) -> io::Result<Option<PathBuf>> {
    let root = tokio::fs::canonicalize(root).await?;
    let file = tokio::fs::canonicalize(file).await?;
    Ok(file.starts_with(&root).then_some(file))
}

/// Join `requested` below `root`, refusing anything that could climb out of it.
fn resolve(root: &FsPath, requested: &str) -> Option<PathBuf> {
    let mut resolved = root.to_path_buf();
    let mut pushed = false;
    for component in FsPath::new(requested).components() {
        match component {
            Component::Normal(part) => {
                resolved.push(part);
                pushed = true;
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    pushed.then_some(resolved)
}

fn content_type(file: &FsPath) -> &'static str {
    let ext = file
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("txt") => "text/plain; charset=utf-8",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("woff2") => "font/woff2",
        _ => "application/octet-stream",
    }
}
