//! Mock transport for testing.
//!
//! Provides a scriptable in-memory implementation of `Transport` for unit and
//! integration tests. Supports:
//! - JSON fixtures keyed by method and path
//! - Error injection
//! - Call tracking

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{Attributes, OmiseError};
use crate::ports::{ApiRequest, Method, Transport};

/// Mock transport for testing.
///
/// Clones share state, so a test can keep one handle for assertions and hand
/// another to a [`Client`](crate::Client).
///
/// # Example
///
/// ```ignore
/// let mock = MockTransport::new();
/// mock.on(Method::Get, "/customers/cust_1", json!({ "object": "customer", "id": "cust_1" }));
///
/// let client = Client::new(mock.clone());
/// let customer = Customer::retrieve(&client, "cust_1", Attributes::new()).await?;
///
/// assert!(mock.was_called(Method::Get, "/customers/cust_1"));
/// ```
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockState>>,
}

/// Internal mutable state.
#[derive(Default)]
struct MockState {
    /// Response bodies by method and path. Later registrations replace earlier ones.
    responses: HashMap<(Method, String), Value>,

    /// Error to return on next call.
    next_error: Option<OmiseError>,

    /// Errors by method and path.
    route_errors: HashMap<(Method, String), OmiseError>,

    /// Track calls for assertions.
    call_log: Vec<RecordedCall>,
}

/// Recorded request for assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub params: Attributes,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Serve `body` for every `method path` request.
    pub fn on(&self, method: Method, path: impl Into<String>, body: Value) {
        self.inner
            .lock()
            .unwrap()
            .responses
            .insert((method, path.into()), body);
    }

    /// Fail every `method path` request with `error`.
    pub fn on_error(&self, method: Method, path: impl Into<String>, error: OmiseError) {
        self.inner
            .lock()
            .unwrap()
            .route_errors
            .insert((method, path.into()), error);
    }

    /// Fail the next request, whatever it is.
    pub fn set_error(&self, error: OmiseError) {
        self.inner.lock().unwrap().next_error = Some(error);
    }

    /// Clear all configured errors.
    pub fn clear_errors(&self) {
        let mut state = self.inner.lock().unwrap();
        state.next_error = None;
        state.route_errors.clear();
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════════

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.inner.lock().unwrap().call_log.clone()
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.inner.lock().unwrap().call_log.last().cloned()
    }

    pub fn call_count(&self) -> usize {
        self.inner.lock().unwrap().call_log.len()
    }

    pub fn was_called(&self, method: Method, path: &str) -> bool {
        self.calls_to(method, path) > 0
    }

    /// Number of `method path` requests seen so far.
    pub fn calls_to(&self, method: Method, path: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .call_log
            .iter()
            .filter(|call| call.method == method && call.path == path)
            .count()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<Attributes, OmiseError> {
        let mut state = self.inner.lock().unwrap();
        state.call_log.push(RecordedCall {
            method: request.method,
            path: request.path.clone(),
            params: request.params,
        });

        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        let route = (request.method, request.path);
        if let Some(error) = state.route_errors.get(&route) {
            return Err(error.clone());
        }

        match state.responses.get(&route) {
            Some(Value::Object(body)) => Ok(body.clone()),
            Some(_) => Err(OmiseError::decode("fixture is not a JSON object")),
            None => Err(OmiseError::api(
                404,
                Some("not_found".to_string()),
                format!("no fixture for {} {}", route.0, route.1),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn get(path: &str) -> ApiRequest {
        ApiRequest::new(Method::Get, path, Attributes::new())
    }

    #[tokio::test]
    async fn serves_fixture_and_records_call() {
        let mock = MockTransport::new();
        mock.on(Method::Get, "/customers/cust_1", json!({ "id": "cust_1" }));

        let body = mock.send(get("/customers/cust_1")).await.unwrap();

        assert_eq!(body.get("id"), Some(&json!("cust_1")));
        assert!(mock.was_called(Method::Get, "/customers/cust_1"));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn missing_fixture_is_not_found() {
        let mock = MockTransport::new();
        let err = mock.send(get("/nowhere")).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn next_error_applies_once() {
        let mock = MockTransport::new();
        mock.on(Method::Get, "/charges/chrg_1", json!({ "id": "chrg_1" }));
        mock.set_error(OmiseError::network("connection reset"));

        assert!(mock.send(get("/charges/chrg_1")).await.is_err());
        assert!(mock.send(get("/charges/chrg_1")).await.is_ok());
    }

    #[tokio::test]
    async fn route_errors_persist_until_cleared() {
        let mock = MockTransport::new();
        mock.on(Method::Get, "/charges/chrg_1", json!({ "id": "chrg_1" }));
        mock.on_error(
            Method::Get,
            "/charges/chrg_1",
            OmiseError::api(500, None, "boom"),
        );

        assert!(mock.send(get("/charges/chrg_1")).await.is_err());
        assert!(mock.send(get("/charges/chrg_1")).await.is_err());

        mock.clear_errors();
        assert!(mock.send(get("/charges/chrg_1")).await.is_ok());
    }

    #[tokio::test]
    async fn non_object_fixture_is_decode_error() {
        let mock = MockTransport::new();
        mock.on(Method::Get, "/weird", json!([1, 2, 3]));

        let err = mock.send(get("/weird")).await.unwrap_err();
        assert_eq!(err.code, crate::domain::OmiseErrorCode::Decode);
    }
}
