//! In-process test harness driving the real router over in-memory stores.
//!
//! Every request passes through the same middleware stack the binary
//! serves: CORS, rate limiting, body limits, and JWT auth. Requests carry
//! an `x-forwarded-for` header because the rate limiter keys clients by it.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, Response};
use axum::Router;
use bytes::Bytes;
use serde_json::Value;
use tower::ServiceExt;

use server_core::kernel::test_dependencies::TestDependencies;
use server_core::server::{build_router, AxumAppState};

/// Client address planted in `x-forwarded-for` on every request.
pub const TEST_CLIENT_IP: &str = "203.0.113.7";

/// Boundary used by [`MultipartBuilder`].
pub const MULTIPART_BOUNDARY: &str = "sokoni-test-boundary";

/// A fully wired application over in-memory dependencies.
///
/// The `deps` handles stay usable after requests, so tests can assert on
/// store contents and recorded provider calls.
pub struct TestApp {
    pub deps: TestDependencies,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_deps(TestDependencies::new())
    }

    pub fn with_deps(deps: TestDependencies) -> Self {
        let state = AxumAppState {
            server_deps: Arc::new(deps.server_deps()),
            jwt_service: deps.jwt_service.clone(),
        };
        let router = build_router(state);

        Self { deps, router }
    }

    /// Mint a session token directly, skipping the login flow.
    pub fn token_for(&self, phone_number: &str) -> String {
        self.deps
            .jwt_service
            .create_token(phone_number)
            .expect("token creation succeeds with the test secret")
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router handles the request")
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> Response<Body> {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-forwarded-for", TEST_CLIENT_IP)
            .body(Body::from(body.to_string()))
            .unwrap();

        self.send(request).await
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .header("x-forwarded-for", TEST_CLIENT_IP)
            .body(Body::empty())
            .unwrap();

        self.send(request).await
    }

    pub async fn get_auth(&self, uri: &str, token: &str) -> Response<Body> {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header("x-forwarded-for", TEST_CLIENT_IP)
            .body(Body::empty())
            .unwrap();

        self.send(request).await
    }

    pub async fn put_json(&self, uri: &str, token: &str, body: Value) -> Response<Body> {
        let request = Request::builder()
            .method("PUT")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header("x-forwarded-for", TEST_CLIENT_IP)
            .body(Body::from(body.to_string()))
            .unwrap();

        self.send(request).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> Response<Body> {
        let request = Request::builder()
            .method("DELETE")
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header("x-forwarded-for", TEST_CLIENT_IP)
            .body(Body::empty())
            .unwrap();

        self.send(request).await
    }

    pub async fn post_multipart(
        &self,
        uri: &str,
        token: &str,
        form: MultipartBuilder,
    ) -> Response<Body> {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY),
            )
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header("x-forwarded-for", TEST_CLIENT_IP)
            .body(Body::from(form.build()))
            .unwrap();

        self.send(request).await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Hand-rolled `multipart/form-data` body for upload tests.
pub struct MultipartBuilder {
    body: Vec<u8>,
}

impl MultipartBuilder {
    pub fn new() -> Self {
        Self { body: Vec::new() }
    }

    /// Append a text field.
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body
            .extend_from_slice(format!("--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
        self.body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        self.body.extend_from_slice(value.as_bytes());
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Append a file part with a declared content type.
    pub fn file(mut self, name: &str, filename: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.body
            .extend_from_slice(format!("--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
        self.body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                name, filename
            )
            .as_bytes(),
        );
        self.body
            .extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Append a file part without a Content-Type header, leaving
    /// classification to the filename extension.
    pub fn file_untyped(mut self, name: &str, filename: &str, bytes: &[u8]) -> Self {
        self.body
            .extend_from_slice(format!("--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
        self.body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\r\n",
                name, filename
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn build(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{}--\r\n", MULTIPART_BOUNDARY).as_bytes());
        self.body
    }
}

impl Default for MultipartBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a response body as JSON.
pub async fn response_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads to completion");
    serde_json::from_slice(&bytes).expect("body is valid JSON")
}

/// Read a response body as raw bytes.
pub async fn response_bytes(response: Response<Body>) -> Bytes {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads to completion")
}
