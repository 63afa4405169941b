#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, Response, header};
use http_body_util::BodyExt;
use icinema::config::BuildInfo;
use icinema::database::{SqliteMovieRepository, establish_pool};
use icinema::http::{AppState, router};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Full application router over a fresh in-memory database.
pub async fn build_test_app() -> Router {
    build_test_app_with(BuildInfo::default()).await
}

pub async fn build_test_app_with(build: BuildInfo) -> Router {
    let pool = establish_pool("sqlite::memory:", 1).await.unwrap();
    let state = AppState::new(SqliteMovieRepository::new(pool), build);
    router(state)
}

pub fn inception() -> Value {
    json!({
        "nombre": "Inception",
        "categoria": "Sci-Fi",
        "ano": 2010,
        "director": "Nolan",
        "duracion": 148,
        "calificacion": 8.8
    })
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(body) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(body.to_string())
        }
        None => Body::empty(),
    };
    let request = builder.body(body).unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn post_json(app: &Router, uri: &str, body: &Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(&body.to_string())).await
}

pub async fn put_json(app: &Router, uri: &str, body: &Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(&body.to_string())).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Creates a movie and returns the response body.
pub async fn create(app: &Router, body: &Value) -> Value {
    let response = post_json(app, "/peliculas", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await
}
