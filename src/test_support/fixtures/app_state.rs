// In-process application for inbound adapter tests.
//
// Notes
// - Requests go through the real router with tower::ServiceExt::oneshot; nothing binds a socket.
// - The clock starts at 2025-01-01 09:00 UTC and only moves when a test sets it.

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

use crate::modules::directory::core::ports::DirectoryUser;
use crate::modules::notifications::adapters::outbound::recording_sink::RecordingNotificationSink;
use crate::modules::exceptions::core::views::DEFAULT_MISSING_CLOCKOUT_THRESHOLD_HOURS;
use crate::shared::core::claims::{Claims, Role};
use crate::shared::core::clock::FixedClock;
use crate::shared::infrastructure::in_memory::store::InMemoryStore;
use crate::shell::claims::{ROLE_HEADER, TENANT_ID_HEADER, USER_ID_HEADER};
use crate::shell::graphql::{AppSchema, build_schema};
use crate::shell::state::{AppState, Ports};
use crate::test_support::fixtures::time_entries::{TENANT_A, at, user_id};

pub struct TestApp {
    pub store: Arc<InMemoryStore>,
    pub clock: Arc<FixedClock>,
    pub sink: Arc<RecordingNotificationSink>,
    state: AppState,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let clock = Arc::new(FixedClock::at(at(9, 0)));
        let sink = Arc::new(RecordingNotificationSink::new());
        let ports = Ports::from_store(store.clone(), sink.clone(), clock.clone());
        let state = AppState::new(&ports, DEFAULT_MISSING_CLOCKOUT_THRESHOLD_HOURS);
        let router = crate::shell::app(state.clone());
        Self {
            store,
            clock,
            sink,
            state,
            router,
        }
    }

    fn claims(&self, seed: u128, role: Role) -> Claims {
        Claims::new(Uuid::from_u128(seed), TENANT_A, role)
    }

    pub fn technician(&self) -> Claims {
        Claims::new(user_id(), TENANT_A, Role::Technician)
    }

    pub fn finance(&self) -> Claims {
        self.claims(0xF1, Role::Finance)
    }

    pub fn manager(&self) -> Claims {
        self.claims(0xA1, Role::Manager)
    }

    pub fn admin(&self) -> Claims {
        self.claims(0xA2, Role::Admin)
    }

    pub fn superadmin(&self) -> Claims {
        self.claims(0xA3, Role::Superadmin)
    }

    pub async fn seed_user(&self, full_name: &str) -> Uuid {
        let id = Uuid::now_v7();
        self.store
            .add_user(DirectoryUser {
                id,
                tenant_id: TENANT_A.to_string(),
                full_name: full_name.to_string(),
            })
            .await;
        id
    }

    pub fn schema(&self) -> AppSchema {
        build_schema(self.state.clone())
    }

    pub async fn send(&self, request: TestRequest) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request.into_request())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        TestResponse { status, body }
    }
}

pub struct TestRequest {
    method: Method,
    uri: String,
    headers: Vec<(&'static str, String)>,
    body: Option<String>,
}

pub fn request(method: Method, uri: &str) -> TestRequest {
    TestRequest {
        method,
        uri: uri.to_string(),
        headers: Vec::new(),
        body: None,
    }
}

impl TestRequest {
    pub fn claims(mut self, claims: &Claims) -> Self {
        self.headers.push((USER_ID_HEADER, claims.user_id.to_string()));
        self.headers.push((TENANT_ID_HEADER, claims.tenant_id.clone()));
        self.headers.push((ROLE_HEADER, claims.role.to_string()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body.to_string());
        self
    }

    /// Sends the text as-is with a JSON content type.
    pub fn raw_json(mut self, body: &str) -> Self {
        self.body = Some(body.to_string());
        self
    }

    fn into_request(self) -> Request<Body> {
        let mut builder = Request::builder().method(self.method).uri(self.uri);
        for (name, value) in self.headers {
            builder = builder.header(name, value);
        }
        match self.body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}
