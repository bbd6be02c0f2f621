//! Users page: create, delete and the manager-only fallback.

mod common;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde_json::{json, Value};

use common::{serve, Counter, Harness};
use shopdesk::users::UsersPage;
use shopdesk::{mount, ClientError};

fn staff() -> Value {
    json!([{"id": 1, "username": "manager", "is_manager": true},
           {"id": 2, "username": "sam", "is_manager": false}])
}

#[tokio::test]
async fn test_invalid_form_is_not_sent() {
    let posts = Counter::default();
    let counted = posts.clone();
    let router = Router::new().route(
        "/users",
        get(|| async { Json(staff()) }).post(move || {
            counted.hit();
            async { Json(json!({"id": 3, "username": "x", "is_manager": false})) }
        }),
    );
    let origin = serve(router).await;
    let mut h = Harness::signed_in(&origin);
    let mut page = mount(&h.ctx, UsersPage::new(&h.ctx)).await.unwrap();

    page.view_mut().form_mut().password = "hunter2".to_string();
    let err = page.view_mut().create().await.unwrap_err();

    assert!(matches!(err, ClientError::ValidationFailed(_)));
    assert_eq!(posts.get(), 0);
    assert_eq!(page.view().form().password, "hunter2");
    assert_eq!(h.drain()[0].title, "Validation");
}

#[tokio::test]
async fn test_form_resets_only_after_success() {
    let lists = Counter::default();
    let counted = lists.clone();
    let router = Router::new().route(
        "/users",
        get(move || {
            counted.hit();
            async { Json(staff()) }
        })
        .post(|Json(body): Json<Value>| async move {
            if body["username"] == "sam" {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"detail": "Username already registered"})),
                )
                    .into_response()
            } else {
                Json(json!({"id": 3, "username": body["username"], "is_manager": body["is_manager"]}))
                    .into_response()
            }
        }),
    );
    let origin = serve(router).await;
    let mut h = Harness::signed_in(&origin);
    let mut page = mount(&h.ctx, UsersPage::new(&h.ctx)).await.unwrap();

    let form = page.view_mut().form_mut();
    form.username = "sam".to_string();
    form.password = "pw".to_string();
    assert!(page.view_mut().create().await.is_err());
    assert_eq!(page.view().form().username, "sam");
    let notes = h.drain();
    assert_eq!(notes[0].description.as_deref(), Some("Username already registered"));
    assert_eq!(lists.get(), 1);

    let form = page.view_mut().form_mut();
    form.username = "kim".to_string();
    form.is_manager = true;
    let created = page.view_mut().create().await.unwrap();

    assert_eq!(created.username, "kim");
    assert!(created.is_manager);
    assert_eq!(page.view().form().username, "");
    assert_eq!(page.view().form().password, "");
    assert!(!page.view().form().is_manager);
    assert_eq!(lists.get(), 2);
    assert_eq!(h.drain()[0].title, "User created");
}

#[tokio::test]
async fn test_delete_refreshes_list() {
    let lists = Counter::default();
    let counted = lists.clone();
    let router = Router::new()
        .route(
            "/users",
            get(move || {
                counted.hit();
                async { Json(staff()) }
            }),
        )
        .route(
            "/users/:id",
            delete(|Path(id): Path<i64>| async move {
                if id == 2 {
                    Json(json!({"detail": "User deleted"})).into_response()
                } else {
                    (StatusCode::NOT_FOUND, Json(json!({"detail": "User not found"}))).into_response()
                }
            }),
        );
    let origin = serve(router).await;
    let mut h = Harness::signed_in(&origin);
    let mut page = mount(&h.ctx, UsersPage::new(&h.ctx)).await.unwrap();

    page.view_mut().delete(2).await.unwrap();
    assert_eq!(lists.get(), 2);
    assert_eq!(h.drain()[0].title, "User deleted");

    let err = page.view_mut().delete(40).await.unwrap_err();
    assert!(matches!(err, ClientError::RequestFailed { status, .. } if status.as_u16() == 404));
    assert_eq!(lists.get(), 2);
    assert_eq!(page.view().users().len(), 2);
    assert_eq!(h.drain()[0].description.as_deref(), Some("User not found"));
}

#[tokio::test]
async fn test_forbidden_list_shows_manager_only() {
    let router = Router::new().route("/users", get(|| async { (StatusCode::FORBIDDEN, "") }));
    let origin = serve(router).await;
    let mut h = Harness::signed_in(&origin);

    let page = mount(&h.ctx, UsersPage::new(&h.ctx)).await.unwrap();

    assert!(page.view().users().is_empty());
    let notes = h.drain();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "Error");
    assert_eq!(notes[0].description.as_deref(), Some("Manager only"));
}
