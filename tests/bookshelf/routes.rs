//! Route-level tests driving the router in-process with `oneshot`.

use axum::http::StatusCode;
use bookshelf::{web, AppState, Book, BookRegistry, Templates};

use crate::support::{get, post_form, post_multipart, post_raw, send, state};

#[tokio::test]
async fn empty_index() {
    let state = state();
    let reply = send(&state, get("/")).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.content_type().unwrap().starts_with("text/html"));
    assert!(reply.body.contains("No books yet."));
}

#[tokio::test]
async fn add_form() {
    let state = state();
    let reply = send(&state, get("/books/add")).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains(r#"action="/books/save""#));
}

#[tokio::test]
async fn save_creates_and_redirects() {
    let state = state();
    let reply = send(
        &state,
        post_form("/books/save", "title=Dune&description=Spice+saga&author=Frank%20Herbert"),
    )
    .await;

    assert_eq!(reply.status, StatusCode::FOUND);
    assert_eq!(reply.location(), Some("/"));
    assert_eq!(
        state.registry.get("0"),
        Some(Book::new("Dune", "Spice saga", "Frank Herbert"))
    );
}

#[tokio::test]
async fn save_defaults_missing_fields() {
    let state = state();
    let reply = send(&state, post_form("/books/save", "title=Only+a+title")).await;

    assert_eq!(reply.status, StatusCode::FOUND);
    assert_eq!(state.registry.get("0"), Some(Book::new("Only a title", "", "")));
}

#[tokio::test]
async fn save_ignores_content_type() {
    let state = state();

    let reply = send(&state, post_raw("/books/save", None, "title=Dune&author=Herbert")).await;
    assert_eq!(reply.status, StatusCode::FOUND);
    assert_eq!(state.registry.get("0"), Some(Book::new("Dune", "", "Herbert")));

    let reply = send(&state, post_raw("/books/save", None, "")).await;
    assert_eq!(reply.status, StatusCode::FOUND);
    assert_eq!(state.registry.get("1"), Some(Book::default()));

    let reply = send(
        &state,
        post_raw("/books/save", Some("text/plain"), "title=Emma"),
    )
    .await;
    assert_eq!(reply.status, StatusCode::FOUND);
    assert_eq!(state.registry.get("2"), Some(Book::new("Emma", "", "")));
}

#[tokio::test]
async fn save_keeps_first_of_repeated_fields() {
    let state = state();
    let reply = send(
        &state,
        post_form("/books/save", "title=First&title=Second&author=A&author=B"),
    )
    .await;

    assert_eq!(reply.status, StatusCode::FOUND);
    assert_eq!(state.registry.get("0"), Some(Book::new("First", "", "A")));
}

#[tokio::test]
async fn save_multipart() {
    let state = state();
    let reply = send(
        &state,
        post_multipart(
            "/books/save",
            &[("title", "Dune"), ("description", "Spice & sand"), ("title", "Other")],
        ),
    )
    .await;

    assert_eq!(reply.status, StatusCode::FOUND);
    assert_eq!(
        state.registry.get("0"),
        Some(Book::new("Dune", "Spice & sand", ""))
    );
}

#[tokio::test]
async fn index_lists_books_escaped() {
    let state = state();
    state.registry.create(Book::new("<b>Bold</b>", "d", "a"));
    state.registry.create(Book::new("Second", "d", "a"));

    let reply = send(&state, get("/")).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("&lt;b&gt;Bold&lt;/b&gt;"));
    assert!(!reply.body.contains("<b>Bold</b>"));
    assert!(reply.body.contains(r#"href="/books/edit/0""#));
    assert!(reply.body.contains(r#"action="/books/delete/1""#));
    assert!(!reply.body.contains("No books yet."));
}

#[tokio::test]
async fn edit_prefills_form() {
    let state = state();
    let id = state
        .registry
        .create(Book::new("Dune", "Spice \"saga\"", "Herbert"));

    let reply = send(&state, get(&format!("/books/edit/{}", id))).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains(r#"value="Dune""#));
    assert!(reply.body.contains("Spice &quot;saga&quot;"));
    assert!(reply.body.contains(r#"action="/books/update/0""#));
}

#[tokio::test]
async fn edit_missing_is_404() {
    let state = state();
    let reply = send(&state, get("/books/edit/42")).await;

    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body, web::NOT_FOUND_BODY);
}

#[tokio::test]
async fn update_overwrites_all_fields() {
    let state = state();
    let id = state.registry.create(Book::new("T1", "D1", "A1"));

    let reply = send(
        &state,
        post_form(&format!("/books/update/{}", id), "title=T2&author=A2"),
    )
    .await;

    assert_eq!(reply.status, StatusCode::FOUND);
    assert_eq!(reply.location(), Some("/"));
    assert_eq!(state.registry.get(&id), Some(Book::new("T2", "", "A2")));
}

#[tokio::test]
async fn update_ignores_content_type_and_repeats() {
    let state = state();
    let id = state.registry.create(Book::new("T", "D", "A"));
    let uri = format!("/books/update/{}", id);

    let reply = send(&state, post_raw(&uri, None, "title=T2&title=T3&author=A2")).await;
    assert_eq!(reply.status, StatusCode::FOUND);
    assert_eq!(state.registry.get(&id), Some(Book::new("T2", "", "A2")));

    let reply = send(&state, post_multipart(&uri, &[("description", "D3")])).await;
    assert_eq!(reply.status, StatusCode::FOUND);
    assert_eq!(state.registry.get(&id), Some(Book::new("", "D3", "")));
}

#[tokio::test]
async fn update_missing_is_404_without_mutation() {
    let state = state();
    let reply = send(&state, post_form("/books/update/999", "title=x")).await;

    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert!(state.registry.is_empty());
}

#[tokio::test]
async fn delete_then_delete_again() {
    let state = state();
    let id = state.registry.create(Book::new("T", "D", "A"));
    let uri = format!("/books/delete/{}", id);

    let reply = send(&state, post_form(&uri, "")).await;
    assert_eq!(reply.status, StatusCode::FOUND);
    assert_eq!(reply.location(), Some("/"));
    assert!(state.registry.is_empty());

    let reply = send(&state, post_form(&uri, "")).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);

    let reply = send(&state, get(&format!("/books/edit/{}", id))).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_is_not_routed_for_get() {
    let state = state();
    let id = state.registry.create(Book::new("T", "D", "A"));

    let reply = send(&state, get(&format!("/books/delete/{}", id))).await;

    assert_eq!(reply.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(state.registry.len(), 1);
}

#[tokio::test]
async fn static_asset() {
    let state = state();
    let reply = send(&state, get("/public/css/style.css")).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.content_type(), Some("text/css; charset=utf-8"));
    assert!(reply.body.contains("font-family"));
}

#[tokio::test]
async fn static_asset_missing_or_outside_root() {
    let state = state();

    for uri in [
        "/public/nope.css",
        "/public/css",
        "/public/..%2FCargo.toml",
        "/public/css%2F..%2F..%2FCargo.toml",
    ] {
        let reply = send(&state, get(uri)).await;
        assert_eq!(reply.status, StatusCode::NOT_FOUND, "{}", uri);
    }
}

#[cfg(unix)]
#[tokio::test]
async fn static_asset_symlink_out_of_root() {
    let outside = tempfile::tempdir().unwrap();
    std::fs::write(outside.path().join("secret.txt"), "secret").unwrap();

    let public = tempfile::tempdir().unwrap();
    std::fs::write(public.path().join("ok.txt"), "ok").unwrap();
    std::os::unix::fs::symlink(outside.path().join("secret.txt"), public.path().join("leak.txt"))
        .unwrap();
    std::os::unix::fs::symlink(public.path().join("ok.txt"), public.path().join("alias.txt"))
        .unwrap();

    let state = AppState::new(BookRegistry::new(), crate::support::templates(), public.path());

    let reply = send(&state, get("/public/leak.txt")).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);

    let reply = send(&state, get("/public/alias.txt")).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, "ok");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let state = state();
    let reply = send(&state, get("/books/nowhere")).await;

    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body, web::NOT_FOUND_BODY);
}

#[tokio::test]
async fn health() {
    let state = state();
    let reply = send(&state, get("/health")).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, "OK");
}

#[tokio::test]
async fn render_failure_is_500() {
    // Only `add` is registered, so the list page has no template.
    let templates = Templates::from_sources([("add", "<form></form>")]).unwrap();
    let state = AppState::new(BookRegistry::new(), templates, "public");

    let reply = send(&state, get("/")).await;
    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(reply.body, web::TEMPLATE_FAILED_BODY);

    let reply = send(&state, get("/books/add")).await;
    assert_eq!(reply.status, StatusCode::OK);
}
