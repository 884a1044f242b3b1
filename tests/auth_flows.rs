//! Signup, login, and logout flows.

mod common;

use axum::http::{header, StatusCode};
use common::{assert_redirects_to, spawn_app, COOKIE};

fn set_cookie(response: &axum_test::TestResponse) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("Response should set a cookie")
        .to_str()
        .expect("Cookie should be valid UTF-8")
        .to_string()
}

#[tokio::test]
async fn signup_creates_account_and_logs_in() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/auth/signup")
        .form(&[("username", "Новичок"), ("password", "secret-password")])
        .await;

    assert_redirects_to(&response, "/notes");
    let cookie = set_cookie(&response);
    assert!(cookie.starts_with("session="));
    assert!(cookie.contains("HttpOnly"));

    // The fresh session works against a protected page
    let session = cookie.split(';').next().unwrap().to_string();
    let list = app
        .server
        .get("/notes")
        .add_header(COOKIE, session.parse::<axum::http::HeaderValue>().unwrap())
        .await;
    assert_eq!(list.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn signup_with_taken_username_rerenders_form() {
    let app = spawn_app().await;
    app.create_user("Новичок").await;

    let response = app
        .server
        .post("/auth/signup")
        .form(&[("username", "Новичок"), ("password", "secret-password")])
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("уже занято"));
}

#[tokio::test]
async fn login_redirects_back_to_next() {
    let app = spawn_app().await;
    let response = app
        .server
        .post("/auth/signup")
        .form(&[("username", "Автор"), ("password", "test-password")])
        .await;
    assert_redirects_to(&response, "/notes");

    let response = app
        .server
        .post("/auth/login")
        .form(&[
            ("username", "Автор"),
            ("password", "test-password"),
            ("next", "/notes/add"),
        ])
        .await;

    assert_redirects_to(&response, "/notes/add");
}

#[tokio::test]
async fn login_ignores_external_next_targets() {
    let app = spawn_app().await;
    app.server
        .post("/auth/signup")
        .form(&[("username", "Автор"), ("password", "test-password")])
        .await;

    let response = app
        .server
        .post("/auth/login")
        .form(&[
            ("username", "Автор"),
            ("password", "test-password"),
            ("next", "https://evil.example/"),
        ])
        .await;

    assert_redirects_to(&response, "/notes");
}

#[tokio::test]
async fn login_with_wrong_password_rerenders_form() {
    let app = spawn_app().await;
    app.create_user("Автор").await;

    let response = app
        .server
        .post("/auth/login")
        .form(&[("username", "Автор"), ("password", "wrong")])
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response
        .text()
        .contains("Неверное имя пользователя или пароль."));
}

#[tokio::test]
async fn logout_destroys_the_session() {
    let app = spawn_app().await;
    let user = app.create_user("Автор").await;
    let cookie = app.login(&user).await;

    let response = app
        .server
        .get("/auth/logout")
        .add_header(COOKIE, cookie.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(set_cookie(&response).contains("Max-Age=0"));

    // The old token no longer authenticates
    let list = app.server.get("/notes").add_header(COOKIE, cookie).await;
    assert_redirects_to(&list, "/auth/login?next=/notes");
}
