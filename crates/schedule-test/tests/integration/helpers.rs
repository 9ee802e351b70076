#![allow(clippy::expect_used, dead_code)]
//! Test helpers for integration tests.
//!
//! Builds a fully wired Salvo service over an in-memory entry store and a
//! static membership directory, and wraps `TestClient` in a small request
//! and response API.

use std::sync::Arc;
use std::time::Duration;

use salvo::http::header::HeaderName;
use salvo::http::{Method, StatusCode};
use salvo::prelude::*;
use salvo::test::{RequestBuilder, ResponseExt, TestClient};
use serde::de::DeserializeOwned;

use schedule_store::directory::{HttpDirectory, MembershipDirectory};
use schedule_test::component::config::Settings;
use schedule_test::component::handlers::{ConfigHandler, DirectoryHandler, StoreHandler};
use schedule_test::component::store::{Classroom, MemoryStore, StaticDirectory};

pub const TENANT: &str = "t1";
pub const INSTRUCTOR: &str = "instructor-1";
pub const STUDENT: &str = "student-1";
pub const OUTSIDER: &str = "outsider";

/// ## Summary
/// Settings used by every test service: built-in defaults with proxy auth.
#[must_use]
pub fn test_config() -> Settings {
    Settings::defaults().expect("default settings are valid")
}

/// Instructor sees classrooms `c1` and `c2`; student sees only `c2`.
#[must_use]
pub fn test_directory() -> StaticDirectory {
    StaticDirectory::new()
        .with_membership(TENANT, INSTRUCTOR, Classroom::new("c1", "Room 101"))
        .with_membership(TENANT, INSTRUCTOR, Classroom::new("c2", "Lab"))
        .with_membership(TENANT, STUDENT, Classroom::new("c2", "Lab"))
}

/// A service together with the store behind it.
pub struct TestApp {
    pub service: Service,
    pub store: Arc<MemoryStore>,
}

fn build_app(settings: Settings, directory: Arc<dyn MembershipDirectory + Send + Sync>) -> TestApp {
    let store = Arc::new(MemoryStore::new());

    // Matches the wiring in main.rs
    let router = Router::new()
        .hoop(StoreHandler {
            store: store.clone(),
        })
        .hoop(DirectoryHandler { directory })
        .hoop(ConfigHandler {
            settings: Arc::new(settings),
        })
        .push(schedule_test::app::api::routes());

    TestApp {
        service: Service::new(router),
        store,
    }
}

/// ## Summary
/// Creates a fresh test service with default settings and [`test_directory`].
#[must_use]
pub fn create_test_app() -> TestApp {
    create_test_app_with(test_config())
}

#[must_use]
pub fn create_test_app_with(settings: Settings) -> TestApp {
    build_app(settings, Arc::new(test_directory()))
}

/// ## Summary
/// Creates a test service whose membership directory points at a closed port.
#[must_use]
pub fn create_unreachable_directory_app() -> TestApp {
    let directory = HttpDirectory::new("http://127.0.0.1:9/api", Duration::from_secs(2))
        .expect("valid directory url");
    build_app(test_config(), Arc::new(directory))
}

/// Test request builder for constructing HTTP requests.
pub struct TestRequest {
    method: Method,
    path: String,
    headers: Vec<(String, String)>,
    body: Option<serde_json::Value>,
}

impl TestRequest {
    #[must_use]
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: &str) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn put(path: &str) -> Self {
        Self::new(Method::PUT, path)
    }

    #[must_use]
    pub fn delete(path: &str) -> Self {
        Self::new(Method::DELETE, path)
    }

    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Authenticates as `user_id` through the proxy header.
    #[must_use]
    pub fn as_user(self, user_id: &str) -> Self {
        self.header("x-remote-user", user_id)
    }

    #[must_use]
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Sends the request to the test service and returns the response.
    pub async fn send(self, service: &Service) -> TestResponse {
        let url = format!("http://127.0.0.1:5800{}", self.path);

        let mut client = match self.method.as_str() {
            "GET" => TestClient::get(&url),
            "POST" => TestClient::post(&url),
            "PUT" => TestClient::put(&url),
            "DELETE" => TestClient::delete(&url),
            _ => RequestBuilder::new(&url, self.method.clone()),
        };

        for (name, value) in self.headers {
            if let Ok(header_name) = HeaderName::try_from(name.as_str()) {
                client = client.add_header(header_name, value, true);
            }
        }

        if let Some(body) = &self.body {
            client = client.json(body);
        }

        let mut response = client.send(service).await;

        let status = response
            .status_code
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Vec<u8> = response.take_bytes(None).await.unwrap_or_default().to_vec();

        TestResponse { status, body }
    }
}

/// Represents an HTTP test response for assertions.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Asserts that the response status matches the expected code.
    #[must_use]
    pub fn assert_status(self, expected: StatusCode) -> Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {expected} but got {}: {}",
            self.status,
            self.body_string()
        );
        self
    }

    #[must_use]
    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Deserializes the body as JSON.
    #[must_use]
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("response body is valid JSON")
    }

    /// The `error` field of a `{"error": ...}` body.
    #[must_use]
    pub fn error_message(&self) -> String {
        let body: serde_json::Value = self.json();
        body["error"]
            .as_str()
            .expect("body has an error message")
            .to_string()
    }
}

/// ## Summary
/// Creates an entry through the API as [`INSTRUCTOR`] and returns its JSON.
pub async fn seed_entry(service: &Service, body: serde_json::Value) -> serde_json::Value {
    TestRequest::post("/api/entries")
        .as_user(INSTRUCTOR)
        .json(body)
        .send(service)
        .await
        .assert_status(StatusCode::CREATED)
        .json()
}
