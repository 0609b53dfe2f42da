//! End-to-end test harness for the Taskboard dashboard.
//!
//! Each test spawns the real router on an ephemeral port, pointed at a
//! `wiremock` server standing in for the task backend, and drives it with a
//! cookie-keeping `reqwest` client that does not follow redirects.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p taskboard-integration-tests
//! ```

#![allow(clippy::missing_panics_doc)]

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use reqwest::{Client, StatusCode, header::LOCATION, redirect::Policy};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use taskboard_web::config::{ApiConfig, DashboardConfig, LogFormat, parse_api_url};
use taskboard_web::state::AppState;

/// Path prefix the mocked backend is mounted under.
pub const API_PREFIX: &str = "/api";

/// A running dashboard plus the mocked backend behind it.
pub struct TestApp {
    pub address: SocketAddr,
    pub backend: MockServer,
    pub client: Client,
}

impl TestApp {
    /// Start a mock backend and a dashboard instance talking to it.
    pub async fn spawn() -> Self {
        let backend = MockServer::start().await;

        let config = DashboardConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            base_url: "http://127.0.0.1".to_string(),
            api: ApiConfig {
                base_url: parse_api_url(&format!("{}{API_PREFIX}", backend.uri()))
                    .expect("mock server URI is a valid base URL"),
                timeout: Some(Duration::from_secs(5)),
            },
            log_format: LogFormat::Text,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 0.0,
            sentry_traces_sample_rate: 0.0,
        };

        let state = AppState::new(config).expect("Failed to create application state");
        let listener = tokio::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .await
            .expect("Failed to bind test listener");
        let address = listener.local_addr().expect("listener has an address");

        tokio::spawn(async move {
            axum::serve(listener, taskboard_web::app(state))
                .await
                .expect("Test server error");
        });

        let client = Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            address,
            backend,
            client,
        }
    }

    /// Absolute URL of a dashboard path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.address)
    }

    /// Backend path as the dashboard will request it.
    #[must_use]
    pub fn api_path(path: &str) -> String {
        format!("{API_PREFIX}{path}")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed")
    }

    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST request failed")
    }

    /// GET a page and return its body, asserting a 200.
    pub async fn page(&self, path: &str) -> String {
        let response = self.get(path).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {path}");
        response.text().await.expect("Failed to read body")
    }

    /// Log in through the login form as `user`, receiving `token`.
    pub async fn login_as(&self, user: &Value, token: &str) {
        let login = Mock::given(method("POST"))
            .and(path(Self::api_path("/users/login")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token": token,
                "user": user,
            })))
            .expect(1)
            .mount_as_scoped(&self.backend)
            .await;

        let email = user["email"].as_str().unwrap_or("user@example.com");
        let response = self
            .post_form("/login", &[("email", email), ("password", "secret")])
            .await;
        assert_redirect(&response, "/dashboard");

        drop(login);
    }
}

/// Assert a `303 See Other` to `location`.
pub fn assert_redirect(response: &reqwest::Response, location: &str) {
    assert_eq!(
        response.status(),
        StatusCode::SEE_OTHER,
        "expected redirect to {location}"
    );
    assert_eq!(
        response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some(location)
    );
}

// =============================================================================
// Fixtures
// =============================================================================

#[must_use]
pub fn admin_user() -> Value {
    json!({ "_id": "admin-1", "name": "Alice Admin", "email": "alice@example.com", "role": "admin" })
}

#[must_use]
pub fn member_user() -> Value {
    json!({ "_id": "member-1", "name": "Bob Member", "email": "bob@example.com", "role": "member" })
}

#[must_use]
pub fn other_member() -> Value {
    json!({ "_id": "member-2", "name": "Carol Member", "email": "carol@example.com", "role": "member" })
}

/// A task document as the backend sends it.
#[must_use]
pub fn task(id: &str, title: &str, status: &str, assignee: &Value) -> Value {
    json!({
        "_id": id,
        "title": title,
        "description": format!("{title} details"),
        "status": status,
        "assignedTo": assignee,
        "deadline": "2025-01-05T00:00:00.000Z",
    })
}

/// Wrap a payload the way read endpoints do.
#[must_use]
pub fn data(payload: Value) -> Value {
    json!({ "success": true, "data": payload })
}
