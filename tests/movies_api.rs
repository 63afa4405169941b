//! Integration tests for the `/peliculas` endpoints.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, build_test_app, create, delete, get, inception, post_json, put_json, send};
use serde_json::{Value, json};
use tower::ServiceExt;

fn without_id(mut movie: Value) -> Value {
    movie.as_object_mut().unwrap().remove("id");
    movie
}

// ---------------------------------------------------------------------------
// Test: the full lifecycle of a movie
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_read_update_delete_roundtrip() {
    let app = build_test_app().await;

    let created = create(&app, &inception()).await;
    let id = created["id"].as_i64().expect("id must be an integer");
    assert_eq!(without_id(created.clone()), inception());

    let response = get(&app, &format!("/peliculas/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, created);

    let response = put_json(&app, &format!("/peliculas/{id}"), &json!({"calificacion": 9.0})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    let mut expected = created.clone();
    expected["calificacion"] = json!(9.0);
    assert_eq!(updated, expected);

    let response = delete(&app, &format!("/peliculas/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, updated);

    let response = get(&app, &format!("/peliculas/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["status_code"], 404);
    assert_eq!(json["detail"], "Película no encontrada");
}

// ---------------------------------------------------------------------------
// Test: each created movie gets its own id
// ---------------------------------------------------------------------------

#[tokio::test]
async fn created_movies_get_unique_ids() {
    let app = build_test_app().await;

    let first = create(&app, &inception()).await;
    let mut other = inception();
    other["nombre"] = json!("Interstellar");
    let second = create(&app, &other).await;

    assert_ne!(first["id"], second["id"]);
    assert_eq!(second["nombre"], "Interstellar");
}

// ---------------------------------------------------------------------------
// Test: listing honours skip and limit
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_paginates_in_insertion_order() {
    let app = build_test_app().await;
    for nombre in ["Alien", "Blade Runner", "Contact", "Dune"] {
        let mut movie = inception();
        movie["nombre"] = json!(nombre);
        create(&app, &movie).await;
    }

    let response = get(&app, "/peliculas").await;
    assert_eq!(response.status(), StatusCode::OK);
    let all = body_json(response).await;
    assert_eq!(all.as_array().unwrap().len(), 4);

    let response = get(&app, "/peliculas?skip=1&limit=2").await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_json(response).await;
    let names: Vec<_> = page
        .as_array()
        .unwrap()
        .iter()
        .map(|movie| movie["nombre"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Blade Runner", "Contact"]);

    let response = get(&app, "/peliculas?skip=10").await;
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn list_on_empty_database_is_empty() {
    let app = build_test_app().await;
    let response = get(&app, "/peliculas?limit=5").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn negative_pagination_is_accepted() {
    let app = build_test_app().await;
    for nombre in ["Alien", "Brazil"] {
        let mut movie = inception();
        movie["nombre"] = json!(nombre);
        create(&app, &movie).await;
    }

    let response = get(&app, "/peliculas?skip=-1&limit=-1").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn non_numeric_pagination_is_unprocessable() {
    let app = build_test_app().await;
    let response = get(&app, "/peliculas?limit=abc").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["status_code"], 422);
}

// ---------------------------------------------------------------------------
// Test: partial updates leave other fields untouched
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_with_several_fields_keeps_the_rest() {
    let app = build_test_app().await;
    let created = create(&app, &inception()).await;
    let id = created["id"].as_i64().unwrap();

    let patch = json!({"director": "Christopher Nolan", "ano": 2011, "categoria": null});
    let response = put_json(&app, &format!("/peliculas/{id}"), &patch).await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;

    assert_eq!(updated["director"], "Christopher Nolan");
    assert_eq!(updated["ano"], 2011);
    assert_eq!(updated["categoria"], "Sci-Fi");
    assert_eq!(updated["nombre"], "Inception");
    assert_eq!(updated["duracion"], 148);
    assert_eq!(updated["calificacion"], 8.8);
}

#[tokio::test]
async fn empty_update_returns_movie_unchanged() {
    let app = build_test_app().await;
    let created = create(&app, &inception()).await;
    let id = created["id"].as_i64().unwrap();

    let response = put_json(&app, &format!("/peliculas/{id}"), &json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, created);
}

// ---------------------------------------------------------------------------
// Test: unknown ids yield 404 for every operation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_id_is_not_found_everywhere() {
    let app = build_test_app().await;

    let response = get(&app, "/peliculas/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = put_json(&app, "/peliculas/999", &json!({"calificacion": 1.0})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = put_json(&app, "/peliculas/999", &json!({})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete(&app, "/peliculas/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["detail"], "Película no encontrada");
}

// ---------------------------------------------------------------------------
// Test: validation failures never reach the database
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_with_missing_field_is_unprocessable() {
    let app = build_test_app().await;
    let mut movie = inception();
    movie.as_object_mut().unwrap().remove("director");

    let response = post_json(&app, "/peliculas", &movie).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["status_code"], 422);
    assert!(json["detail"].as_str().unwrap().contains("director"));

    let response = get(&app, "/peliculas").await;
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn create_with_wrong_type_is_unprocessable() {
    let app = build_test_app().await;
    let mut movie = inception();
    movie["ano"] = json!("dos mil diez");

    let response = post_json(&app, "/peliculas", &movie).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn blank_title_is_unprocessable() {
    let app = build_test_app().await;
    let mut movie = inception();
    movie["nombre"] = json!("   ");

    let response = post_json(&app, "/peliculas", &movie).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let created = create(&app, &inception()).await;
    let id = created["id"].as_i64().unwrap();
    let response = put_json(&app, &format!("/peliculas/{id}"), &json!({"nombre": ""})).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = get(&app, &format!("/peliculas/{id}")).await;
    assert_eq!(body_json(response).await, created);
}

#[tokio::test]
async fn malformed_json_is_unprocessable() {
    let app = build_test_app().await;
    let response = send(&app, Method::POST, "/peliculas", Some("{\"nombre\": ")).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["status_code"], 422);
}

#[tokio::test]
async fn non_numeric_id_is_unprocessable() {
    let app = build_test_app().await;
    for response in [
        get(&app, "/peliculas/abc").await,
        put_json(&app, "/peliculas/abc", &json!({"ano": 2000})).await,
        delete(&app, "/peliculas/abc").await,
    ] {
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}

#[tokio::test]
async fn body_without_json_content_type_is_unsupported() {
    let app = build_test_app().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/peliculas")
        .body(Body::from(inception().to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}
