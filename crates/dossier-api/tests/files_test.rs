//! File endpoint integration tests: upload, list, delete and preview.

mod helpers;

use axum::http::StatusCode;
use dossier_db::FileRepository;
use helpers::{
    jpeg_bytes, pdf_bytes, png_bytes, setup_test_app, setup_test_app_with_limit, upload,
    upload_form, FALLBACK_KEY, PUBLIC_BASE_URL,
};
use image::GenericImageView;
use serde_json::{json, Value};

#[tokio::test]
async fn test_upload_returns_created_record() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/files")
        .multipart(upload_form(
            jpeg_bytes(64, 64),
            "passport.jpg",
            "image/jpeg",
            Some("passport"),
        ))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["message"], "File uploaded successfully.");

    let data = &body["data"];
    let id = data["id"].as_i64().expect("id is a number");
    assert_eq!(data["filename"], "passport.jpg");
    assert_eq!(data["type"], "passport");
    assert_eq!(data["mime_type"], "image/jpeg");
    assert!(data["size"].as_i64().unwrap() > 0);
    assert_eq!(data["uploaded_at"].as_str().unwrap().len(), 19);
    assert_eq!(
        data["preview_url"],
        format!("{}/api/files/{}/preview", PUBLIC_BASE_URL, id)
    );

    let record = app.repository.find_all().await.unwrap();
    assert_eq!(record.len(), 1);
    assert!(record[0].path.starts_with("uploads/passport/"));
    assert!(app.storage.exists(&record[0].path).await.unwrap());
}

#[tokio::test]
async fn test_list_groups_by_type_in_upload_order() {
    let app = setup_test_app().await;

    let first = upload(&app, jpeg_bytes(10, 10), "a.jpg", "image/jpeg", "passport").await;
    let visa = upload(&app, pdf_bytes(), "visa.pdf", "application/pdf", "visa").await;
    let second = upload(&app, png_bytes(10, 10), "b.png", "image/png", "passport").await;

    let response = app.client().get("/api/files").await;
    response.assert_status_ok();
    let body: Value = response.json();

    let passport_ids: Vec<&Value> = body["passport"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| &f["id"])
        .collect();
    assert_eq!(passport_ids, vec![&first["id"], &second["id"]]);
    assert_eq!(body["visa"].as_array().unwrap().len(), 1);
    assert_eq!(body["visa"][0]["id"], visa["id"]);
    assert_eq!(body["photo"], json!([]));
}

#[tokio::test]
async fn test_list_empty_has_all_groups() {
    let app = setup_test_app().await;

    let response = app.client().get("/api/files").await;

    response.assert_status_ok();
    response.assert_json(&json!({"passport": [], "visa": [], "photo": []}));
}

#[tokio::test]
async fn test_invalid_type_is_rejected() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/files")
        .multipart(upload_form(
            pdf_bytes(),
            "license.pdf",
            "application/pdf",
            Some("driver_license"),
        ))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["error"], "Type must be one of: passport, visa, photo.");
    assert_eq!(body["field"], "type");
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(app.stored_upload_count(), 0);
}

#[tokio::test]
async fn test_missing_type_is_rejected() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/files")
        .multipart(upload_form(pdf_bytes(), "visa.pdf", "application/pdf", None))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json::<Value>()["field"], "type");
}

#[tokio::test]
async fn test_missing_file_is_rejected() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/files")
        .multipart(axum_test::multipart::MultipartForm::new().add_text("type", "visa"))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["field"], "file");
    assert_eq!(body["error"], "The file field is required.");
}

#[tokio::test]
async fn test_disallowed_extension_is_rejected() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/files")
        .multipart(upload_form(
            b"hello".to_vec(),
            "notes.txt",
            "text/plain",
            Some("photo"),
        ))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["error"], "Only PDF, PNG, and JPG files are allowed.");
    assert_eq!(body["field"], "file");
    assert_eq!(app.stored_upload_count(), 0);
}

#[tokio::test]
async fn test_mismatched_content_type_is_rejected() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/files")
        .multipart(upload_form(pdf_bytes(), "scan.png", "application/pdf", Some("visa")))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(app.stored_upload_count(), 0);
}

#[tokio::test]
async fn test_pdf_declared_as_octet_stream_is_accepted() {
    let app = setup_test_app().await;

    let data = upload(
        &app,
        pdf_bytes(),
        "doc.pdf",
        "application/octet-stream",
        "visa",
    )
    .await;

    assert_eq!(data["filename"], "doc.pdf");
    assert_eq!(data["mime_type"], "application/octet-stream");
    assert_eq!(data["type"], "visa");
    assert_eq!(app.stored_upload_count(), 1);
}

#[tokio::test]
async fn test_non_image_bytes_declared_as_png_are_rejected() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/files")
        .multipart(upload_form(
            b"not an image at all".to_vec(),
            "x.png",
            "image/png",
            Some("photo"),
        ))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["error"], "Only PDF, PNG, and JPG files are allowed.");
    assert_eq!(body["field"], "file");
    assert_eq!(app.stored_upload_count(), 0);
    assert!(app.repository.is_empty().await);
}

#[tokio::test]
async fn test_oversized_file_is_rejected() {
    let app = setup_test_app_with_limit(1).await;

    let response = app
        .client()
        .post("/api/files")
        .multipart(upload_form(
            vec![0u8; 1024 * 1024 + 1],
            "big.pdf",
            "application/pdf",
            Some("visa"),
        ))
        .await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    let body: Value = response.json();
    assert_eq!(body["error"], "The file may not be greater than 1 MB.");
    assert_eq!(app.stored_upload_count(), 0);
}

#[tokio::test]
async fn test_failed_insert_leaves_no_blob() {
    let app = setup_test_app().await;
    app.repository.fail_inserts(true);

    let response = app
        .client()
        .post("/api/files")
        .multipart(upload_form(pdf_bytes(), "visa.pdf", "application/pdf", Some("visa")))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["code"], "DATABASE_ERROR");
    assert!(body.get("details").is_none());
    assert_eq!(app.stored_upload_count(), 0);
}

#[tokio::test]
async fn test_delete_removes_record_and_blob() {
    let app = setup_test_app().await;
    let data = upload(&app, pdf_bytes(), "visa.pdf", "application/pdf", "visa").await;
    let id = data["id"].as_i64().unwrap();
    assert_eq!(app.stored_upload_count(), 1);

    let response = app.client().delete(&format!("/api/files/{}", id)).await;

    response.assert_status_ok();
    response.assert_json(&json!({"message": "File deleted successfully."}));
    assert_eq!(app.stored_upload_count(), 0);

    let list: Value = app.client().get("/api/files").await.json();
    assert_eq!(list["visa"], json!([]));

    let again = app.client().delete(&format!("/api/files/{}", id)).await;
    again.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(again.json::<Value>()["error"], "File not found.");
}

#[tokio::test]
async fn test_delete_unknown_or_malformed_id_is_not_found() {
    let app = setup_test_app().await;

    app.client()
        .delete("/api/files/999")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.client()
        .delete("/api/files/not-a-number")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_preview_downscales_image() {
    let app = setup_test_app().await;
    let data = upload(&app, jpeg_bytes(600, 600), "Face.JPG", "image/jpeg", "photo").await;
    let id = data["id"].as_i64().unwrap();

    let response = app
        .client()
        .get(&format!("/api/files/{}/preview", id))
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "image/jpeg");
    assert_eq!(response.header("cache-control"), "public, max-age=31536000");
    assert_eq!(
        response.header("content-disposition"),
        "inline; filename=\"Face.JPG\""
    );

    let thumbnail = image::load_from_memory(response.as_bytes()).unwrap();
    assert_eq!(thumbnail.dimensions(), (100, 100));
    assert!(app
        .storage
        .exists(&format!("thumbnails/{}.jpg", id))
        .await
        .unwrap());
}

#[tokio::test]
async fn test_preview_keeps_small_images_and_aspect_ratio() {
    let app = setup_test_app().await;
    let small = upload(&app, png_bytes(50, 30), "small.png", "image/png", "photo").await;
    let wide = upload(&app, png_bytes(400, 200), "wide.png", "image/png", "photo").await;

    let response = app
        .client()
        .get(&format!("/api/files/{}/preview", small["id"]))
        .await;
    response.assert_status_ok();
    let img = image::load_from_memory(response.as_bytes()).unwrap();
    assert_eq!(img.dimensions(), (50, 30));

    let response = app
        .client()
        .get(&format!("/api/files/{}/preview", wide["id"]))
        .await;
    response.assert_status_ok();
    let img = image::load_from_memory(response.as_bytes()).unwrap();
    assert_eq!(img.dimensions(), (100, 50));
}

#[tokio::test]
async fn test_preview_pdf_serves_fallback() {
    let app = setup_test_app().await;
    let fallback = png_bytes(32, 32);
    app.storage
        .upload_with_key(FALLBACK_KEY, fallback.clone())
        .await
        .unwrap();
    let data = upload(&app, pdf_bytes(), "visa.pdf", "application/pdf", "visa").await;

    let response = app
        .client()
        .get(&format!("/api/files/{}/preview", data["id"]))
        .await;

    response.assert_status_ok();
    assert_eq!(response.as_bytes().to_vec(), fallback);
}

#[tokio::test]
async fn test_preview_pdf_without_fallback_fails() {
    let app = setup_test_app().await;
    let data = upload(&app, pdf_bytes(), "visa.pdf", "application/pdf", "visa").await;
    let id = data["id"].as_i64().unwrap();

    let response = app
        .client()
        .get(&format!("/api/files/{}/preview", id))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>()["error"],
        "Thumbnail generation failed or original missing"
    );
    assert!(!app
        .storage
        .exists(&format!("thumbnails/{}.jpg", id))
        .await
        .unwrap());
}

#[tokio::test]
async fn test_preview_with_missing_original_fails() {
    let app = setup_test_app().await;
    let data = upload(&app, png_bytes(20, 20), "photo.png", "image/png", "photo").await;
    let id = data["id"].as_i64().unwrap();
    let record = app.repository.find_all().await.unwrap();
    app.storage.delete(&record[0].path).await.unwrap();

    let response = app
        .client()
        .get(&format!("/api/files/{}/preview", id))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["code"], "THUMBNAIL_UNAVAILABLE");
    assert!(body.get("details").is_none());
    assert!(!app
        .storage
        .exists(&format!("thumbnails/{}.jpg", id))
        .await
        .unwrap());
}

#[tokio::test]
async fn test_preview_unknown_id_is_not_found() {
    let app = setup_test_app().await;

    app.client()
        .get("/api/files/12345/preview")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_removes_cached_thumbnail() {
    let app = setup_test_app().await;
    let data = upload(&app, png_bytes(200, 200), "photo.png", "image/png", "photo").await;
    let id = data["id"].as_i64().unwrap();
    let thumbnail = format!("thumbnails/{}.jpg", id);

    app.client()
        .get(&format!("/api/files/{}/preview", id))
        .await
        .assert_status_ok();
    assert!(app.storage.exists(&thumbnail).await.unwrap());

    app.client()
        .delete(&format!("/api/files/{}", id))
        .await
        .assert_status_ok();

    assert!(!app.storage.exists(&thumbnail).await.unwrap());
}
