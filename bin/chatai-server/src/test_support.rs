//! Fixtures shared by the store, service and endpoint tests.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{Method, Request, StatusCode, header};
use chatai_core::{AiConfig, ChatRole, ResponseClient};
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use crate::config::Config;
use crate::entities::{ChatMessage, Project, Prompt, SqliteStore};
use crate::middleware::auth::X_USER_ID;
use crate::routes;
use crate::state::AppState;
use crate::templates::Templates;

pub async fn memory_store() -> SqliteStore {
    SqliteStore::connect("sqlite::memory:")
        .await
        .expect("in-memory database")
}

/// No API key: every turn is answered in sandbox mode without network I/O.
pub fn sandbox_config() -> AiConfig {
    AiConfig::default()
}

pub fn project_for(user_id: &str, name: &str) -> Project {
    Project {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.to_owned(),
        name: name.to_owned(),
        description: None,
        created_at: Utc::now(),
    }
}

pub fn prompt_at(project_id: &str, content: &str, at: DateTime<Utc>) -> Prompt {
    Prompt {
        id: Uuid::new_v4().to_string(),
        project_id: project_id.to_owned(),
        content: content.to_owned(),
        created_at: at,
    }
}

pub fn message_at(
    project_id: &str,
    role: ChatRole,
    content: &str,
    at: DateTime<Utc>,
) -> ChatMessage {
    ChatMessage {
        id: Uuid::new_v4().to_string(),
        project_id: project_id.to_owned(),
        role,
        content: content.to_owned(),
        created_at: at,
    }
}

/// The full router over an in-memory database and a temporary media root.
pub struct TestApp {
    pub state: Arc<AppState>,
    router: Router,
    media: TempDir,
}

impl TestApp {
    pub async fn new(ai: AiConfig) -> Self {
        let media = tempfile::tempdir().expect("temp media root");
        let config = Config {
            media_root: media.path().to_path_buf(),
            enable_swagger: false,
            ai: ai.clone(),
            ..Config::default()
        };
        let state = Arc::new(AppState {
            config: Arc::new(config),
            store: Arc::new(memory_store().await),
            ai: Arc::new(ResponseClient::new(ai).expect("completion client")),
            templates: Arc::new(Templates::load().expect("templates")),
        });
        let router = routes::build(Arc::clone(&state));
        Self {
            state,
            router,
            media,
        }
    }

    pub fn media_root(&self) -> &Path {
        self.media.path()
    }

    async fn send(&self, req: Request<Body>) -> (StatusCode, Bytes) {
        let response = self.router.clone().oneshot(req).await.expect("infallible router");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("response body")
            .to_bytes();
        (status, bytes)
    }

    async fn send_json(&self, req: Request<Body>) -> (StatusCode, Value) {
        let (status, bytes) = self.send(req).await;
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn request(method: Method, user: Option<&str>, path: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(path);
        match user {
            Some(user) => builder.header(X_USER_ID, user),
            None => builder,
        }
    }

    pub async fn get(&self, user: &str, path: &str) -> (StatusCode, Value) {
        let req = Self::request(Method::GET, Some(user), path).body(Body::empty()).unwrap();
        self.send_json(req).await
    }

    pub async fn get_anonymous(&self, path: &str) -> (StatusCode, Value) {
        let req = Self::request(Method::GET, None, path).body(Body::empty()).unwrap();
        self.send_json(req).await
    }

    pub async fn get_html(&self, user: &str, path: &str) -> (StatusCode, String) {
        let req = Self::request(Method::GET, Some(user), path).body(Body::empty()).unwrap();
        let (status, bytes) = self.send(req).await;
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    pub async fn delete(&self, user: &str, path: &str) -> (StatusCode, Value) {
        let req = Self::request(Method::DELETE, Some(user), path).body(Body::empty()).unwrap();
        self.send_json(req).await
    }

    pub async fn post_json(&self, user: &str, path: &str, body: Value) -> (StatusCode, Value) {
        self.post_raw(user, path, &body.to_string()).await
    }

    /// POST with a JSON content type but an arbitrary body.
    pub async fn post_raw(&self, user: &str, path: &str, body: &str) -> (StatusCode, Value) {
        let req = Self::request(Method::POST, Some(user), path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap();
        self.send_json(req).await
    }

    pub async fn post_form(&self, user: &str, path: &str, body: &str) -> (StatusCode, String) {
        let req = Self::request(Method::POST, Some(user), path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_owned()))
            .unwrap();
        let (status, bytes) = self.send(req).await;
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    pub async fn post_multipart(
        &self,
        user: &str,
        path: &str,
        boundary: &str,
        body: String,
    ) -> (StatusCode, Value) {
        let req = Self::request(Method::POST, Some(user), path)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();
        self.send_json(req).await
    }

    /// Create a project through the API and return its id.
    pub async fn create_project(&self, user: &str, name: &str) -> String {
        let (status, body) = self.post_json(user, "/projects", json!({ "name": name })).await;
        assert_eq!(status, StatusCode::CREATED, "create project failed: {body}");
        body["id"].as_str().expect("project id").to_owned()
    }
}
