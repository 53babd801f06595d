//! Story and chapter API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use storyforge::shared::validation::CHAPTER_CONTENT_MAX_BYTES;
use storyforge::shared::writing::{
    ChapterListResponse, ChapterResponse, StoryListResponse, StoryResponse,
};

use crate::common::*;

#[tokio::test]
async fn test_stories_are_numbered_in_creation_order() {
    let app = TestApp::spawn().await;
    let ada = register_user(&app, "ada").await;
    let project = create_project(&app, &ada, "Novel").await;

    for title in ["One", "Two", "Three"] {
        create_story(&app, &ada, &project, title).await;
    }

    let list: StoryListResponse = app
        .server
        .get(&format!("/api/stories/projects/{}/stories", project.id))
        .authorization_bearer(&ada.token)
        .await
        .json();

    let order: Vec<_> = list
        .stories
        .iter()
        .map(|s| (s.title.as_str(), s.order_index))
        .collect();
    assert_eq!(order, vec![("One", 1), ("Two", 2), ("Three", 3)]);
    assert!(list.stories.iter().all(|s| s.project_title == "Novel"));
}

#[tokio::test]
async fn test_null_story_title_is_a_validation_error() {
    let app = TestApp::spawn().await;
    let ada = register_user(&app, "ada").await;
    let project = create_project(&app, &ada, "Novel").await;

    let response = app
        .server
        .post(&format!("/api/stories/projects/{}/stories", project.id))
        .authorization_bearer(&ada.token)
        .json(&json!({ "title": null }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "Story title is required");
}

#[tokio::test]
async fn test_story_update_keeps_position_and_created_at() {
    let app = TestApp::spawn().await;
    let ada = register_user(&app, "ada").await;
    let project = create_project(&app, &ada, "Novel").await;
    create_story(&app, &ada, &project, "First").await;
    let story = create_story(&app, &ada, &project, "Second").await;

    let response = app
        .server
        .put(&format!("/api/stories/{}", story.id))
        .authorization_bearer(&ada.token)
        .json(&json!({ "title": "Renamed", "description": "now with words" }))
        .await;
    response.assert_status_ok();

    let updated: StoryResponse = response.json();
    assert_eq!(updated.message.as_deref(), Some("Story updated successfully"));
    assert_eq!(updated.story.title, "Renamed");
    assert_eq!(updated.story.description.as_deref(), Some("now with words"));
    assert_eq!(updated.story.order_index, 2);
    assert_eq!(updated.story.created_at, story.created_at);
}

#[tokio::test]
async fn test_story_order_index_can_be_set_explicitly() {
    let app = TestApp::spawn().await;
    let ada = register_user(&app, "ada").await;
    let project = create_project(&app, &ada, "Novel").await;
    let story = create_story(&app, &ada, &project, "Moved").await;

    let updated: StoryResponse = app
        .server
        .put(&format!("/api/stories/{}", story.id))
        .authorization_bearer(&ada.token)
        .json(&json!({ "title": "Moved", "order_index": 7 }))
        .await
        .json();

    assert_eq!(updated.story.order_index, 7);
}

#[tokio::test]
async fn test_cannot_add_story_to_foreign_project() {
    let app = TestApp::spawn().await;
    let ada = register_user(&app, "ada").await;
    let bob = register_user(&app, "bob").await;
    let project = create_project(&app, &ada, "Novel").await;

    let response = app
        .server
        .post(&format!("/api/stories/projects/{}/stories", project.id))
        .authorization_bearer(&bob.token)
        .json(&json!({ "title": "Intrusion" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["message"], "Project not found");
}

#[tokio::test]
async fn test_chapters_round_trip_with_breadcrumbs() {
    let app = TestApp::spawn().await;
    let ada = register_user(&app, "ada").await;
    let project = create_project(&app, &ada, "Novel").await;
    let story = create_story(&app, &ada, &project, "Arc").await;

    let first = create_chapter(&app, &ada, &story, "Ch 1", "<p>Once</p>").await;
    let second = create_chapter(&app, &ada, &story, "Ch 2", "").await;
    assert_eq!((first.order_index, second.order_index), (1, 2));

    let fetched: ChapterResponse = app
        .server
        .get(&format!("/api/chapters/{}", first.id))
        .authorization_bearer(&ada.token)
        .await
        .json();
    assert_eq!(fetched.chapter.content, "<p>Once</p>");
    assert_eq!(fetched.chapter.story_title, "Arc");
    assert_eq!(fetched.chapter.project_id, project.id);
    assert_eq!(fetched.chapter.project_title, "Novel");

    let list: ChapterListResponse = app
        .server
        .get(&format!("/api/chapters/stories/{}/chapters", story.id))
        .authorization_bearer(&ada.token)
        .await
        .json();
    let ids: Vec<_> = list.chapters.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
}

#[tokio::test]
async fn test_chapter_content_defaults_to_empty() {
    let app = TestApp::spawn().await;
    let ada = register_user(&app, "ada").await;
    let project = create_project(&app, &ada, "Novel").await;
    let story = create_story(&app, &ada, &project, "Arc").await;

    let response = app
        .server
        .post(&format!("/api/chapters/stories/{}/chapters", story.id))
        .authorization_bearer(&ada.token)
        .json(&json!({ "title": "Blank" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<ChapterResponse>().chapter.content, "");
}

#[tokio::test]
async fn test_chapter_content_limit() {
    let app = TestApp::spawn().await;
    let ada = register_user(&app, "ada").await;
    let project = create_project(&app, &ada, "Novel").await;
    let story = create_story(&app, &ada, &project, "Arc").await;
    let path = format!("/api/chapters/stories/{}/chapters", story.id);

    let at_limit = app
        .server
        .post(&path)
        .authorization_bearer(&ada.token)
        .json(&json!({ "title": "Full", "content": "a".repeat(CHAPTER_CONTENT_MAX_BYTES) }))
        .await;
    at_limit.assert_status(StatusCode::CREATED);

    let over = app
        .server
        .post(&path)
        .authorization_bearer(&ada.token)
        .json(&json!({ "title": "Overflow", "content": "a".repeat(CHAPTER_CONTENT_MAX_BYTES + 1) }))
        .await;
    over.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(over.json::<Value>()["errors"][0]["field"], "content");
}

#[tokio::test]
async fn test_concurrent_edits_last_write_wins() {
    let app = TestApp::spawn().await;
    let ada = register_user(&app, "ada").await;
    let project = create_project(&app, &ada, "Novel").await;
    let story = create_story(&app, &ada, &project, "Arc").await;
    let chapter = create_chapter(&app, &ada, &story, "Ch", "draft").await;
    let path = format!("/api/chapters/{}", chapter.id);

    for content in ["tab one", "tab two"] {
        app.server
            .put(&path)
            .authorization_bearer(&ada.token)
            .json(&json!({ "title": "Ch", "content": content }))
            .await
            .assert_status_ok();
    }

    let stored: ChapterResponse = app.server.get(&path).authorization_bearer(&ada.token).await.json();
    assert_eq!(stored.chapter.content, "tab two");
    assert_eq!(stored.chapter.order_index, chapter.order_index);
    assert_eq!(stored.chapter.created_at, chapter.created_at);
}

#[tokio::test]
async fn test_deleting_story_removes_its_chapters() {
    let app = TestApp::spawn().await;
    let ada = register_user(&app, "ada").await;
    let project = create_project(&app, &ada, "Novel").await;
    let story = create_story(&app, &ada, &project, "Arc").await;
    let chapter = create_chapter(&app, &ada, &story, "Ch", "").await;

    let response = app
        .server
        .delete(&format!("/api/stories/{}", story.id))
        .authorization_bearer(&ada.token)
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["message"], "Story deleted successfully");

    app.server
        .get(&format!("/api/chapters/{}", chapter.id))
        .authorization_bearer(&ada.token)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    // The project survives
    app.server
        .get(&format!("/api/projects/{}", project.id))
        .authorization_bearer(&ada.token)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_foreign_chapter_cannot_be_edited() {
    let app = TestApp::spawn().await;
    let ada = register_user(&app, "ada").await;
    let bob = register_user(&app, "bob").await;
    let project = create_project(&app, &ada, "Novel").await;
    let story = create_story(&app, &ada, &project, "Arc").await;
    let chapter = create_chapter(&app, &ada, &story, "Ch", "mine").await;

    let response = app
        .server
        .put(&format!("/api/chapters/{}", chapter.id))
        .authorization_bearer(&bob.token)
        .json(&json!({ "title": "Ch", "content": "yours" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let stored: ChapterResponse = app
        .server
        .get(&format!("/api/chapters/{}", chapter.id))
        .authorization_bearer(&ada.token)
        .await
        .json();
    assert_eq!(stored.chapter.content, "mine");
}
