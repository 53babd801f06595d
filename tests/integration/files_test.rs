//! File upload, listing, download and delete integration tests

use std::path::Path;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use pretty_assertions::assert_eq;
use serde_json::Value;

use storyforge::shared::entity::EntityKind;
use storyforge::shared::writing::{FileListResponse, UploadResponse};

use crate::common::*;

const MB: usize = 1024 * 1024;

fn file_part(name: &str, mime: &str, bytes: Vec<u8>) -> Part {
    Part::bytes(bytes).file_name(name).mime_type(mime)
}

fn single_file(name: &str, mime: &str, bytes: Vec<u8>) -> MultipartForm {
    MultipartForm::new().add_part("file", file_part(name, mime, bytes))
}

fn blob_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}

async fn file_rows(app: &TestApp) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM files")
        .fetch_one(&app.state.db_pool)
        .await
        .unwrap();
    count
}

#[tokio::test]
async fn test_upload_image_to_chapter() {
    let app = TestApp::spawn().await;
    let ada = register_user(&app, "ada").await;
    let project = create_project(&app, &ada, "Novel").await;
    let story = create_story(&app, &ada, &project, "Arc").await;
    let chapter = create_chapter(&app, &ada, &story, "Ch 1", "").await;

    let response = app
        .server
        .post(&format!("/api/files/upload/chapters/{}", chapter.id))
        .authorization_bearer(&ada.token)
        .multipart(single_file("My Cover!.png", "image/png", vec![7u8; 2048]))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: UploadResponse = response.json();
    assert_eq!(body.message, "File uploaded successfully");
    assert_eq!(body.file.filename, "My Cover!.png");
    assert_eq!(body.file.entity_type, EntityKind::Chapter);
    assert_eq!(body.file.entity_id, chapter.id);
    assert_eq!(body.file.file_size, 2048);
    assert_eq!(body.file.uploaded_by.to_string(), ada.id);
    assert!(body.file.file_path.starts_with("chapters/"));
    assert!(body.file.file_path.ends_with("-MyCover.png"));

    let on_disk = std::fs::read(app.blob_path(&body.file.file_path)).unwrap();
    assert_eq!(on_disk.len(), 2048);
}

#[tokio::test]
async fn test_upload_several_files_at_once() {
    let app = TestApp::spawn().await;
    let ada = register_user(&app, "ada").await;
    let project = create_project(&app, &ada, "Novel").await;

    let form = MultipartForm::new()
        .add_part("file", file_part("a.txt", "text/plain", b"alpha".to_vec()))
        .add_part("file", file_part("b.pdf", "application/pdf", b"%PDF-1.4".to_vec()));

    let response = app
        .server
        .post(&format!("/api/files/upload/projects/{}", project.id))
        .authorization_bearer(&ada.token)
        .multipart(form)
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: UploadResponse = response.json();
    assert_eq!(body.message, "2 files uploaded successfully");
    assert_eq!(body.files.len(), 2);
    assert_eq!(body.file, body.files[0]);
    assert_eq!(blob_count(&app.upload_root().join("projects")), 2);
}

#[tokio::test]
async fn test_oversized_image_is_rejected() {
    let app = TestApp::spawn().await;
    let ada = register_user(&app, "ada").await;
    let project = create_project(&app, &ada, "Novel").await;

    let response = app
        .server
        .post(&format!("/api/files/upload/projects/{}", project.id))
        .authorization_bearer(&ada.token)
        .multipart(single_file("huge.png", "image/png", vec![0u8; 6 * MB]))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "File too large. image files must be 5MB or smaller.");
    assert_eq!(body["errors"][0]["code"], "TooLarge");
    assert_eq!(body["errors"][0]["filename"], "huge.png");

    assert_eq!(blob_count(&app.upload_root().join("projects")), 0);
    assert_eq!(file_rows(&app).await, 0);
}

#[tokio::test]
async fn test_large_document_is_accepted() {
    let app = TestApp::spawn().await;
    let ada = register_user(&app, "ada").await;
    let project = create_project(&app, &ada, "Novel").await;

    // Over the image limit, under the document limit
    let response = app
        .server
        .post(&format!("/api/files/upload/projects/{}", project.id))
        .authorization_bearer(&ada.token)
        .multipart(single_file("manuscript.pdf", "application/pdf", vec![1u8; 6 * MB]))
        .await;

    response.assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_executable_disguised_as_image_is_rejected() {
    let app = TestApp::spawn().await;
    let ada = register_user(&app, "ada").await;
    let project = create_project(&app, &ada, "Novel").await;

    let response = app
        .server
        .post(&format!("/api/files/upload/projects/{}", project.id))
        .authorization_bearer(&ada.token)
        .multipart(single_file("payload.exe", "image/png", b"MZ".to_vec()))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "File extension .exe is not allowed");
    assert_eq!(body["errors"][0]["code"], "UnsupportedType");
    assert_eq!(file_rows(&app).await, 0);
}

#[tokio::test]
async fn test_one_bad_file_rejects_the_whole_batch() {
    let app = TestApp::spawn().await;
    let ada = register_user(&app, "ada").await;
    let project = create_project(&app, &ada, "Novel").await;

    let form = MultipartForm::new()
        .add_part("file", file_part("ok.png", "image/png", vec![1u8; 16]))
        .add_part("file", file_part("bad.zip", "application/zip", vec![2u8; 16]))
        .add_part("file", file_part("bad.svg", "image/svg+xml", vec![3u8; 16]));

    let response = app
        .server
        .post(&format!("/api/files/upload/projects/{}", project.id))
        .authorization_bearer(&ada.token)
        .multipart(form)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "2 files were rejected");
    let rejected: Vec<_> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["filename"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(rejected, vec!["bad.zip", "bad.svg"]);

    assert_eq!(blob_count(&app.upload_root().join("projects")), 0);
    assert_eq!(file_rows(&app).await, 0);
}

#[tokio::test]
async fn test_too_many_files() {
    let app = TestApp::spawn().await;
    let ada = register_user(&app, "ada").await;
    let project = create_project(&app, &ada, "Novel").await;

    let form = (0..6).fold(MultipartForm::new(), |form, i| {
        form.add_part("file", file_part(&format!("{}.txt", i), "text/plain", b"x".to_vec()))
    });

    let response = app
        .server
        .post(&format!("/api/files/upload/projects/{}", project.id))
        .authorization_bearer(&ada.token)
        .multipart(form)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(file_rows(&app).await, 0);
}

#[tokio::test]
async fn test_upload_without_file_field() {
    let app = TestApp::spawn().await;
    let ada = register_user(&app, "ada").await;
    let project = create_project(&app, &ada, "Novel").await;

    let response = app
        .server
        .post(&format!("/api/files/upload/projects/{}", project.id))
        .authorization_bearer(&ada.token)
        .multipart(MultipartForm::new().add_text("note", "no attachment"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["message"], "No file uploaded");
}

#[tokio::test]
async fn test_unknown_entity_type_is_rejected() {
    let app = TestApp::spawn().await;
    let ada = register_user(&app, "ada").await;

    let response = app
        .server
        .post(&format!("/api/files/upload/users/{}", ada.id))
        .authorization_bearer(&ada.token)
        .multipart(single_file("a.txt", "text/plain", b"x".to_vec()))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_download_and_delete() {
    let app = TestApp::spawn().await;
    let ada = register_user(&app, "ada").await;
    let project = create_project(&app, &ada, "Novel").await;
    let story = create_story(&app, &ada, &project, "Arc").await;
    let upload_path = format!("/api/files/upload/stories/{}", story.id);

    let first: UploadResponse = app
        .server
        .post(&upload_path)
        .authorization_bearer(&ada.token)
        .multipart(single_file("outline.txt", "text/plain", b"beginning, middle, end".to_vec()))
        .await
        .json();
    let second: UploadResponse = app
        .server
        .post(&upload_path)
        .authorization_bearer(&ada.token)
        .multipart(single_file("map.gif", "image/gif", b"GIF89a".to_vec()))
        .await
        .json();

    let listed: FileListResponse = app
        .server
        .get(&format!("/api/files/entity/stories/{}", story.id))
        .authorization_bearer(&ada.token)
        .await
        .json();
    let names: Vec<_> = listed.files.iter().map(|f| f.file.filename.as_str()).collect();
    assert_eq!(names, vec!["map.gif", "outline.txt"]);
    assert!(listed.files.iter().all(|f| f.uploaded_by_name == "ada"));

    let download = app
        .server
        .get(&format!("/api/files/{}", first.file.id))
        .authorization_bearer(&ada.token)
        .await;
    download.assert_status_ok();
    assert_eq!(download.as_bytes().as_ref(), b"beginning, middle, end");
    assert_eq!(download.header("content-type"), "text/plain; charset=utf-8");
    assert_eq!(
        download.header("content-disposition"),
        "attachment; filename=\"outline.txt\""
    );

    let deleted = app
        .server
        .delete(&format!("/api/files/{}", second.file.id))
        .authorization_bearer(&ada.token)
        .await;
    deleted.assert_status_ok();
    assert_eq!(deleted.json::<Value>()["message"], "File deleted successfully");
    assert!(!app.blob_path(&second.file.file_path).exists());

    app.server
        .get(&format!("/api/files/{}", second.file.id))
        .authorization_bearer(&ada.token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_blob_downloads_as_not_found() {
    let app = TestApp::spawn().await;
    let ada = register_user(&app, "ada").await;
    let project = create_project(&app, &ada, "Novel").await;

    let uploaded: UploadResponse = app
        .server
        .post(&format!("/api/files/upload/projects/{}", project.id))
        .authorization_bearer(&ada.token)
        .multipart(single_file("gone.txt", "text/plain", b"x".to_vec()))
        .await
        .json();
    std::fs::remove_file(app.blob_path(&uploaded.file.file_path)).unwrap();

    let response = app
        .server
        .get(&format!("/api/files/{}", uploaded.file.id))
        .authorization_bearer(&ada.token)
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["message"], "File not found");
}

#[tokio::test]
async fn test_other_users_cannot_reach_chapter_or_its_files() {
    let app = TestApp::spawn().await;
    let ada = register_user(&app, "ada").await;
    let bob = register_user(&app, "bob").await;

    let project = create_project(&app, &ada, "Novel").await;
    let story = create_story(&app, &ada, &project, "Arc 1").await;
    assert_eq!(story.order_index, 1);
    let chapter = create_chapter(&app, &ada, &story, "Ch 1", "").await;
    assert_eq!(chapter.order_index, 1);

    let uploaded = app
        .server
        .post(&format!("/api/files/upload/chapters/{}", chapter.id))
        .authorization_bearer(&ada.token)
        .multipart(single_file("draft.pdf", "application/pdf", vec![9u8; 2 * MB]))
        .await;
    uploaded.assert_status(StatusCode::CREATED);
    let file = uploaded.json::<UploadResponse>().file;

    let chapter_response = app
        .server
        .get(&format!("/api/chapters/{}", chapter.id))
        .authorization_bearer(&bob.token)
        .await;
    chapter_response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(chapter_response.json::<Value>()["message"], "Chapter not found");

    app.server
        .get(&format!("/api/files/entity/chapters/{}", chapter.id))
        .authorization_bearer(&bob.token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.server
        .get(&format!("/api/files/{}", file.id))
        .authorization_bearer(&bob.token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.server
        .delete(&format!("/api/files/{}", file.id))
        .authorization_bearer(&bob.token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.server
        .post(&format!("/api/files/upload/chapters/{}", chapter.id))
        .authorization_bearer(&bob.token)
        .multipart(single_file("spam.txt", "text/plain", b"x".to_vec()))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    // Ada's file is intact
    assert!(app.blob_path(&file.file_path).exists());
    assert_eq!(file_rows(&app).await, 1);
}

#[tokio::test]
async fn test_deleting_project_removes_descendant_files() {
    let app = TestApp::spawn().await;
    let ada = register_user(&app, "ada").await;
    let project = create_project(&app, &ada, "Novel").await;
    let story = create_story(&app, &ada, &project, "Arc").await;
    let chapter = create_chapter(&app, &ada, &story, "Ch", "").await;

    let mut paths = Vec::new();
    for target in [
        format!("projects/{}", project.id),
        format!("stories/{}", story.id),
        format!("chapters/{}", chapter.id),
    ] {
        let uploaded: UploadResponse = app
            .server
            .post(&format!("/api/files/upload/{}", target))
            .authorization_bearer(&ada.token)
            .multipart(single_file("note.txt", "text/plain", b"x".to_vec()))
            .await
            .json();
        paths.push(uploaded.file.file_path);
    }
    assert!(paths.iter().all(|p| app.blob_path(p).exists()));

    app.server
        .delete(&format!("/api/projects/{}", project.id))
        .authorization_bearer(&ada.token)
        .await
        .assert_status_ok();

    assert!(paths.iter().all(|p| !app.blob_path(p).exists()));
    assert_eq!(file_rows(&app).await, 0);
}
