//! Template content for the notes application: list scoping and forms.

mod common;

use axum::http::StatusCode;
use common::{spawn_app, COOKIE};

#[tokio::test]
async fn note_appears_in_its_authors_list() {
    let app = spawn_app().await;
    let user = app.create_user("testuser").await;
    let note = app
        .create_note(&user, "Заголовок списка", "Текст", "list-slug")
        .await;
    let cookie = app.login(&user).await;

    let response = app.server.get("/notes").add_header(COOKIE, cookie).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.text();
    assert!(body.contains(&note.title));
    assert!(body.contains(&format!("/notes/{}", note.slug)));
}

#[tokio::test]
async fn note_is_hidden_from_other_users_lists() {
    let app = spawn_app().await;
    let owner = app.create_user("testuser").await;
    let other = app.create_user("testuser1").await;
    let note = app
        .create_note(&owner, "Чужой заголовок", "Текст", "foreign-slug")
        .await;
    let cookie = app.login(&other).await;

    let response = app.server.get("/notes").add_header(COOKIE, cookie).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.text();
    assert!(!body.contains(&note.title));
    assert!(!body.contains(&note.slug));
}

#[tokio::test]
async fn creation_page_contains_note_form() {
    let app = spawn_app().await;
    let user = app.create_user("testuser").await;
    let cookie = app.login(&user).await;

    let response = app.server.get("/notes/add").add_header(COOKIE, cookie).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.text();
    assert!(body.contains("id=\"note-form\""));
    for field in ["name=\"title\"", "name=\"text\"", "name=\"slug\""] {
        assert!(body.contains(field), "form should contain {}", field);
    }
}

#[tokio::test]
async fn edit_page_contains_prefilled_note_form() {
    let app = spawn_app().await;
    let user = app.create_user("testuser").await;
    let note = app
        .create_note(&user, "Заголовок", "Текст заметки", "note-slug")
        .await;
    let cookie = app.login(&user).await;

    let response = app
        .server
        .get(&format!("/notes/{}/edit", note.slug))
        .add_header(COOKIE, cookie)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.text();
    assert!(body.contains("id=\"note-form\""));
    assert!(body.contains(&note.title));
    assert!(body.contains(&note.text));
    assert!(body.contains(&format!("value=\"{}\"", note.slug)));
}
