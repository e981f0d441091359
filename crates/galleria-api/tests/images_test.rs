//! Image API integration tests.
//!
//! Run with: `cargo test -p galleria-api --test images_test`
//! Requires Docker for testcontainers (Postgres).

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use galleria_core::constants::MAX_UPLOAD_SIZE_BYTES;
use helpers::{fixtures, setup_test_app, TestApp};
use serde_json::Value;

async fn upload_png(app: &TestApp, title: &str) -> Value {
    let form = MultipartForm::new().add_text("title", title).add_part(
        "image",
        Part::bytes(fixtures::minimal_png())
            .file_name("photo.png")
            .mime_type("image/png"),
    );
    let response = app.client().post("/images").multipart(form).await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

#[tokio::test]
async fn test_upload_roundtrip() {
    let app = setup_test_app().await;

    let form = MultipartForm::new()
        .add_text("title", "Sunset")
        .add_text("description", "Evening sky")
        .add_part(
            "image",
            Part::bytes(fixtures::minimal_png())
                .file_name("sunset.png")
                .mime_type("image/png"),
        );

    let response = app.client().post("/images").multipart(form).await;
    response.assert_status(axum::http::StatusCode::CREATED);

    let body = response.json::<Value>();
    let id = body["id"].as_str().expect("id in response");
    assert_eq!(body["title"], "Sunset");
    assert_eq!(body["description"], "Evening sky");
    assert_eq!(body["original_name"], "sunset.png");
    assert_eq!(body["mime_type"], "image/png");
    assert_eq!(
        body["size_bytes"].as_i64().unwrap(),
        fixtures::minimal_png().len() as i64
    );
    assert_eq!(body["storage_target"], "local");
    let url = body["url"].as_str().expect("url in response");
    assert!(url.starts_with("http://localhost:3000/media/gallery/"));

    // Blob actually landed on disk under the recorded path.
    let storage_path = body["storage_path"].as_str().unwrap();
    assert!(app.blob_path(storage_path).exists());

    // GET returns the same record.
    let get_response = app.client().get(&format!("/images/{}", id)).await;
    get_response.assert_status_ok();
    let fetched = get_response.json::<Value>();
    assert_eq!(fetched["id"], body["id"]);
    assert_eq!(fetched["url"], body["url"]);
}

#[tokio::test]
async fn test_upload_without_metadata_fields() {
    let app = setup_test_app().await;

    let form = MultipartForm::new().add_part(
        "image",
        Part::bytes(fixtures::minimal_gif())
            .file_name("pixel.gif")
            .mime_type("image/gif"),
    );
    let response = app.client().post("/images").multipart(form).await;
    response.assert_status(axum::http::StatusCode::CREATED);

    let body = response.json::<Value>();
    assert!(body["title"].is_null());
    assert!(body["description"].is_null());
    assert_eq!(body["mime_type"], "image/gif");
}

#[tokio::test]
async fn test_upload_rejects_missing_file() {
    let app = setup_test_app().await;

    let form = MultipartForm::new().add_text("title", "No file here");
    let response = app.client().post("/images").multipart(form).await;
    response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);

    let body = response.json::<Value>();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["field"], "image");
}

#[tokio::test]
async fn test_upload_rejects_non_image_content() {
    let app = setup_test_app().await;

    // Claimed content type is image/png but the bytes are not an image;
    // acceptance is decided from the bytes.
    let form = MultipartForm::new().add_part(
        "image",
        Part::bytes(fixtures::text_payload())
            .file_name("fake.png")
            .mime_type("image/png"),
    );
    let response = app.client().post("/images").multipart(form).await;
    response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json::<Value>()["field"], "image");
}

#[tokio::test]
async fn test_upload_rejects_empty_file() {
    let app = setup_test_app().await;

    let form = MultipartForm::new().add_part(
        "image",
        Part::bytes(Vec::new())
            .file_name("empty.png")
            .mime_type("image/png"),
    );
    let response = app.client().post("/images").multipart(form).await;
    response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_upload_size_boundary() {
    let app = setup_test_app().await;

    // Exactly at the cap: accepted.
    let form = MultipartForm::new().add_part(
        "image",
        Part::bytes(fixtures::png_padded_to(MAX_UPLOAD_SIZE_BYTES))
            .file_name("at-limit.png")
            .mime_type("image/png"),
    );
    let response = app.client().post("/images").multipart(form).await;
    response.assert_status(axum::http::StatusCode::CREATED);
    assert_eq!(
        response.json::<Value>()["size_bytes"].as_i64().unwrap(),
        MAX_UPLOAD_SIZE_BYTES as i64
    );

    // One byte over: rejected as a validation failure.
    let form = MultipartForm::new().add_part(
        "image",
        Part::bytes(fixtures::png_padded_to(MAX_UPLOAD_SIZE_BYTES + 1))
            .file_name("over-limit.png")
            .mime_type("image/png"),
    );
    let response = app.client().post("/images").multipart(form).await;
    response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json::<Value>()["field"], "image");
}

#[tokio::test]
async fn test_upload_rejects_overlong_title_without_storing_anything() {
    let app = setup_test_app().await;

    let form = MultipartForm::new()
        .add_text("title", "a".repeat(256))
        .add_part(
            "image",
            Part::bytes(fixtures::minimal_png())
                .file_name("photo.png")
                .mime_type("image/png"),
        );
    let response = app.client().post("/images").multipart(form).await;
    response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json::<Value>()["field"], "title");

    // Nothing was created.
    let list = app.client().get("/images").await.json::<Value>();
    assert_eq!(list["total"].as_i64(), Some(0));
}

#[tokio::test]
async fn test_list_pagination() {
    let app = setup_test_app().await;

    for i in 0..25 {
        upload_png(&app, &format!("Image {:02}", i)).await;
    }

    let page1 = app.client().get("/images").await.json::<Value>();
    assert_eq!(page1["page"].as_i64(), Some(1));
    assert_eq!(page1["per_page"].as_i64(), Some(20));
    assert_eq!(page1["total"].as_i64(), Some(25));
    assert_eq!(page1["total_pages"].as_i64(), Some(2));
    assert_eq!(page1["items"].as_array().unwrap().len(), 20);

    let page2 = app.client().get("/images?page=2").await.json::<Value>();
    assert_eq!(page2["items"].as_array().unwrap().len(), 5);

    // Newest first across the whole listing, with no duplicates between pages.
    let mut seen = std::collections::HashSet::new();
    let mut timestamps = Vec::new();
    for item in page1["items"]
        .as_array()
        .unwrap()
        .iter()
        .chain(page2["items"].as_array().unwrap())
    {
        assert!(seen.insert(item["id"].as_str().unwrap().to_string()));
        timestamps.push(item["created_at"].as_str().unwrap().to_string());
    }
    assert_eq!(seen.len(), 25);
    let mut sorted = timestamps.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(timestamps, sorted);

    // Page past the end is empty but keeps the true total.
    let page3 = app.client().get("/images?page=3").await.json::<Value>();
    assert_eq!(page3["items"].as_array().unwrap().len(), 0);
    assert_eq!(page3["total"].as_i64(), Some(25));

    // page=0 clamps to the first page.
    let clamped = app.client().get("/images?page=0").await.json::<Value>();
    assert_eq!(clamped["page"].as_i64(), Some(1));
    assert_eq!(clamped["items"].as_array().unwrap().len(), 20);
}

#[tokio::test]
async fn test_update_metadata_is_partial() {
    let app = setup_test_app().await;
    let created = upload_png(&app, "Original title").await;
    let id = created["id"].as_str().unwrap();

    // PUT with title only: description survives.
    let response = app
        .client()
        .put(&format!("/images/{}", id))
        .json(&serde_json::json!({ "title": "New title" }))
        .await;
    response.assert_status_ok();
    let updated = response.json::<Value>();
    assert_eq!(updated["title"], "New title");
    assert_eq!(updated["description"], created["description"]);

    // Storage fields are untouched by metadata updates.
    assert_eq!(updated["filename"], created["filename"]);
    assert_eq!(updated["storage_path"], created["storage_path"]);
    assert_eq!(updated["storage_target"], created["storage_target"]);
    assert_eq!(updated["mime_type"], created["mime_type"]);
    assert_eq!(updated["size_bytes"], created["size_bytes"]);
    assert_eq!(updated["created_at"], created["created_at"]);

    // PATCH with description only: the new title survives.
    let response = app
        .client()
        .patch(&format!("/images/{}", id))
        .json(&serde_json::json!({ "description": "Added later" }))
        .await;
    response.assert_status_ok();
    let patched = response.json::<Value>();
    assert_eq!(patched["title"], "New title");
    assert_eq!(patched["description"], "Added later");
}

#[tokio::test]
async fn test_update_explicit_null_clears_field() {
    let app = setup_test_app().await;

    let form = MultipartForm::new()
        .add_text("title", "Temporary")
        .add_text("description", "To be cleared")
        .add_part(
            "image",
            Part::bytes(fixtures::minimal_png())
                .file_name("photo.png")
                .mime_type("image/png"),
        );
    let created = app
        .client()
        .post("/images")
        .multipart(form)
        .await
        .json::<Value>();
    let id = created["id"].as_str().unwrap();

    // Explicit null clears the description; the omitted title survives.
    let response = app
        .client()
        .patch(&format!("/images/{}", id))
        .json(&serde_json::json!({ "description": null }))
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["title"], "Temporary");
    assert!(body["description"].is_null());

    // Null title clears too, independently of description.
    let response = app
        .client()
        .put(&format!("/images/{}", id))
        .json(&serde_json::json!({ "title": null }))
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert!(body["title"].is_null());
    assert!(body["description"].is_null());
}

#[tokio::test]
async fn test_update_with_empty_body_is_a_valid_noop() {
    let app = setup_test_app().await;
    let created = upload_png(&app, "Keep me").await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .client()
        .put(&format!("/images/{}", id))
        .json(&serde_json::json!({}))
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["title"], "Keep me");
}

#[tokio::test]
async fn test_update_validation_and_not_found() {
    let app = setup_test_app().await;
    let created = upload_png(&app, "Valid").await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .client()
        .put(&format!("/images/{}", id))
        .json(&serde_json::json!({ "title": "a".repeat(256) }))
        .await;
    response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json::<Value>()["field"], "title");

    let response = app
        .client()
        .put(&format!("/images/{}", uuid::Uuid::new_v4()))
        .json(&serde_json::json!({ "title": "anything" }))
        .await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);

    // Wrong field type renders as a consistent JSON error, not a plain-text rejection.
    let response = app
        .client()
        .put(&format!("/images/{}", id))
        .json(&serde_json::json!({ "title": 123 }))
        .await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_serve_file() {
    let app = setup_test_app().await;
    let created = upload_png(&app, "Servable").await;
    let id = created["id"].as_str().unwrap();

    let response = app.client().get(&format!("/images/{}/file", id)).await;
    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "image/png");
    let disposition = response.header("content-disposition");
    let disposition = disposition.to_str().unwrap();
    assert!(disposition.starts_with("inline"));
    assert!(disposition.contains("photo.png"));
    assert_eq!(response.as_bytes().to_vec(), fixtures::minimal_png());
}

#[tokio::test]
async fn test_serve_falls_back_to_stored_name_for_unsafe_filenames() {
    let app = setup_test_app().await;

    let form = MultipartForm::new().add_part(
        "image",
        Part::bytes(fixtures::minimal_png())
            .file_name("evil\"name.png")
            .mime_type("image/png"),
    );
    let created = app
        .client()
        .post("/images")
        .multipart(form)
        .await
        .json::<Value>();
    let id = created["id"].as_str().unwrap();
    let stored_name = created["filename"].as_str().unwrap();

    let response = app.client().get(&format!("/images/{}/file", id)).await;
    response.assert_status_ok();
    let disposition = response.header("content-disposition");
    let disposition = disposition.to_str().unwrap();
    assert!(disposition.starts_with("inline"));
    assert!(disposition.contains(stored_name));
    assert!(!disposition.contains("evil"));
}

#[tokio::test]
async fn test_serve_missing_blob_is_not_found() {
    let app = setup_test_app().await;
    let created = upload_png(&app, "Doomed blob").await;
    let id = created["id"].as_str().unwrap();
    let storage_path = created["storage_path"].as_str().unwrap();

    std::fs::remove_file(app.blob_path(storage_path)).expect("remove blob file");

    let response = app.client().get(&format!("/images/{}/file", id)).await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);

    // The metadata row is still there and still deletable.
    let response = app.client().delete(&format!("/images/{}", id)).await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_delete_removes_row_and_blob() {
    let app = setup_test_app().await;
    let created = upload_png(&app, "Short lived").await;
    let id = created["id"].as_str().unwrap();
    let storage_path = created["storage_path"].as_str().unwrap();
    assert!(app.blob_path(storage_path).exists());

    let response = app.client().delete(&format!("/images/{}", id)).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["message"], "Deleted");

    assert!(!app.blob_path(storage_path).exists());

    let response = app.client().get(&format!("/images/{}", id)).await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);

    let response = app.client().get(&format!("/images/{}/file", id)).await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);

    // Deleting again is a plain not-found.
    let response = app.client().delete(&format!("/images/{}", id)).await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_unknown_image_is_not_found() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get(&format!("/images/{}", uuid::Uuid::new_v4()))
        .await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);
    let body = response.json::<Value>();
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["error"], "Image not found");
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_test_app().await;

    let response = app.client().get("/health").await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "healthy");
    assert_eq!(body["storage"], "healthy");
}
