//! Authentication and fixture helpers
//!
//! Everything goes through the HTTP API so helpers exercise the same paths
//! as real clients.

use axum::http::StatusCode;
use serde_json::json;

use storyforge::shared::writing::{
    AuthResponse, Chapter, ChapterResponse, Project, ProjectResponse, Story, StoryResponse,
};

use super::app::TestApp;

pub const TEST_PASSWORD: &str = "password123";

/// Test user credentials
pub struct TestUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub token: String,
}

/// Register `username` with `{username}@example.com`
pub async fn register_user(app: &TestApp, username: &str) -> TestUser {
    let email = format!("{}@example.com", username);
    let response = app
        .server
        .post("/api/auth/register")
        .json(&json!({
            "username": username,
            "email": email,
            "password": TEST_PASSWORD,
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: AuthResponse = response.json();
    TestUser {
        id: body.user.id.to_string(),
        username: body.user.username,
        email: body.user.email,
        token: body.token,
    }
}

pub async fn create_project(app: &TestApp, user: &TestUser, title: &str) -> Project {
    let response = app
        .server
        .post("/api/projects")
        .authorization_bearer(&user.token)
        .json(&json!({ "title": title }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<ProjectResponse>().project
}

pub async fn create_story(app: &TestApp, user: &TestUser, project: &Project, title: &str) -> Story {
    let response = app
        .server
        .post(&format!("/api/stories/projects/{}/stories", project.id))
        .authorization_bearer(&user.token)
        .json(&json!({ "title": title }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<StoryResponse>().story
}

pub async fn create_chapter(
    app: &TestApp,
    user: &TestUser,
    story: &Story,
    title: &str,
    content: &str,
) -> Chapter {
    let response = app
        .server
        .post(&format!("/api/chapters/stories/{}/chapters", story.id))
        .authorization_bearer(&user.token)
        .json(&json!({ "title": title, "content": content }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<ChapterResponse>().chapter
}
