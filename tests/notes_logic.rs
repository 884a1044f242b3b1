//! Business rules for the notes application: creation, slug handling,
//! and owner-only mutation.

mod common;

use axum::http::StatusCode;
use common::{assert_redirects_to, spawn_app, COOKIE};
use zametki::services::translit::slugify;

#[tokio::test]
async fn user_can_create_note() {
    let app = spawn_app().await;
    let author = app.create_user("Автор").await;
    let cookie = app.login(&author).await;

    let response = app
        .server
        .post("/notes/add")
        .add_header(COOKIE, cookie)
        .form(&[
            ("title", "Новый заголовок"),
            ("text", "Новый текст"),
            ("slug", "new-slug"),
        ])
        .await;

    assert_redirects_to(&response, "/notes/done");
    assert_eq!(app.note_count().await, 1);

    let note = app.last_note().await;
    assert_eq!(note.title, "Новый заголовок");
    assert_eq!(note.text, "Новый текст");
    assert_eq!(note.slug, "new-slug");
    assert_eq!(note.author_id, author.id);
}

#[tokio::test]
async fn anonymous_user_cannot_create_note() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/notes/add")
        .form(&[
            ("title", "Новый заголовок"),
            ("text", "Новый текст"),
            ("slug", "new-slug"),
        ])
        .await;

    assert_redirects_to(&response, "/auth/login?next=/notes/add");
    assert_eq!(app.note_count().await, 0);
}

#[tokio::test]
async fn duplicate_slug_is_rejected_with_field_error() {
    let app = spawn_app().await;
    let author = app.create_user("Автор").await;
    app.create_note(&author, "Заголовок", "Текст", "note-slug")
        .await;
    let cookie = app.login(&author).await;

    let response = app
        .server
        .post("/notes/add")
        .add_header(COOKIE, cookie)
        .form(&[
            ("title", "Новый заголовок"),
            ("text", "Новый текст"),
            ("slug", "note-slug"),
        ])
        .await;

    // Validation failure re-renders the form
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains(
        "note-slug - такой slug уже существует, придумайте уникальное значение!"
    ));
    assert_eq!(app.note_count().await, 1);
}

#[tokio::test]
async fn empty_slug_is_derived_from_title() {
    let app = spawn_app().await;
    let author = app.create_user("Автор").await;
    let cookie = app.login(&author).await;

    let response = app
        .server
        .post("/notes/add")
        .add_header(COOKIE, cookie)
        .form(&[("title", "Новый заголовок"), ("text", "Новый текст")])
        .await;

    assert_redirects_to(&response, "/notes/done");

    let note = app.last_note().await;
    assert_eq!(note.slug, slugify("Новый заголовок"));
}

#[tokio::test]
async fn author_can_edit_note() {
    let app = spawn_app().await;
    let author = app.create_user("Автор").await;
    let note = app
        .create_note(&author, "Заголовок", "Текст заметки", "note-slug")
        .await;
    let cookie = app.login(&author).await;

    let response = app
        .server
        .post(&format!("/notes/{}/edit", note.slug))
        .add_header(COOKIE, cookie)
        .form(&[
            ("title", "Новый заголовок"),
            ("text", "Новый текст"),
            ("slug", "new-slug"),
        ])
        .await;

    assert_redirects_to(&response, "/notes/done");

    let updated = app.get_note(note.id).await;
    assert_eq!(updated.title, "Новый заголовок");
    assert_eq!(updated.text, "Новый текст");
    assert_eq!(updated.slug, "new-slug");
}

#[tokio::test]
async fn other_user_cannot_edit_note() {
    let app = spawn_app().await;
    let author = app.create_user("Автор").await;
    let admin = app.create_user("Админ").await;
    let note = app
        .create_note(&author, "Заголовок", "Текст заметки", "note-slug")
        .await;
    let cookie = app.login(&admin).await;

    let response = app
        .server
        .post(&format!("/notes/{}/edit", note.slug))
        .add_header(COOKIE, cookie)
        .form(&[
            ("title", "Новый заголовок"),
            ("text", "Новый текст"),
            ("slug", "new-slug"),
        ])
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    // The note is unchanged in the store
    let kept = app.get_note(note.id).await;
    assert_eq!(kept.title, note.title);
    assert_eq!(kept.text, note.text);
    assert_eq!(kept.slug, note.slug);
}

#[tokio::test]
async fn author_can_delete_note() {
    let app = spawn_app().await;
    let author = app.create_user("Автор").await;
    let note = app
        .create_note(&author, "Заголовок", "Текст заметки", "note-slug")
        .await;
    let cookie = app.login(&author).await;

    let response = app
        .server
        .post(&format!("/notes/{}/delete", note.slug))
        .add_header(COOKIE, cookie)
        .await;

    assert_redirects_to(&response, "/notes/done");
    assert_eq!(app.note_count().await, 0);
}

#[tokio::test]
async fn other_user_cannot_delete_note() {
    let app = spawn_app().await;
    let author = app.create_user("Автор").await;
    let admin = app.create_user("Админ").await;
    let note = app
        .create_note(&author, "Заголовок", "Текст заметки", "note-slug")
        .await;
    let cookie = app.login(&admin).await;

    let response = app
        .server
        .post(&format!("/notes/{}/delete", note.slug))
        .add_header(COOKIE, cookie)
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(app.note_count().await, 1);
}
