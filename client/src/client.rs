//! Validated-fetch pipeline for the linkhub API.
//!
//! # Design
//! `ApiClient` holds a `base_url` plus two injected collaborators: a
//! [`Transport`] that executes the round-trip and a [`Reporter`] that
//! receives classified failures. Each call is single-shot — no retry, no
//! backoff, no deduplication — and never panics or propagates an error past
//! its boundary; every path ends in an [`Outcome`].
//!
//! Classification rules:
//! - transport failure or a body that is not JSON → unexpected, masked
//! - non-2xx with a valid `{err}` envelope → 400 goes to the field-error
//!   log, 403/404 are left to page-level handling, anything else is
//!   unexpected
//! - non-2xx with a malformed envelope → unexpected
//! - 2xx without a `payload` member, or a `payload` the caller's validator
//!   rejects → unexpected
//!
//! At most one reporter call happens per `send`; a successful call makes
//! none.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Failure, BLACK_SWAN_FALLBACK_STATUS, MASKED_ERROR_MESSAGE};
use crate::http::{HttpMethod, HttpRequest, RequestBody, Transport};
use crate::report::Reporter;
use crate::validate::{ErrorBody, Schema, Validator};

/// Result of one validated fetch: the schema-checked payload or a
/// classified failure.
///
/// `Failure` preserves the cause (status plus the server's message where one
/// was declared, the masked message otherwise) instead of collapsing to an
/// absence value; callers that only care about presence use [`Outcome::ok`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    Failure(Failure),
}

impl<T> Outcome<T> {
    pub fn ok(self) -> Option<T> {
        match self {
            Outcome::Success(v) => Some(v),
            Outcome::Failure(_) => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(f) => Some(f),
        }
    }
}

/// Client for the linkhub REST API.
///
/// Stateless between calls: the only fields are the base URL and the two
/// collaborators. Typed endpoint wrappers live in `queries.rs`; everything
/// funnels through [`ApiClient::send`] or [`ApiClient::send_blob`].
#[derive(Debug, Clone)]
pub struct ApiClient<T, R> {
    base_url: String,
    transport: T,
    reporter: R,
}

impl<T: Transport, R: Reporter> ApiClient<T, R> {
    pub fn new(base_url: &str, transport: T, reporter: R) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            reporter,
        }
    }

    /// Issue one request with a JSON-encoded payload and validate the
    /// response payload with `validator`.
    ///
    /// GET and HEAD requests carry no body regardless of `payload`; every
    /// other method sends its JSON serialization.
    pub fn send<P, V>(
        &self,
        endpoint: &str,
        method: HttpMethod,
        payload: &P,
        validator: &V,
    ) -> Outcome<V::Output>
    where
        P: Serialize + ?Sized,
        V: Validator,
    {
        let body = if method.has_body() {
            match serde_json::to_string(payload) {
                Ok(json) => Some(RequestBody::Json(json)),
                Err(e) => {
                    warn!("failed to serialize payload for {endpoint}: {e}");
                    return Outcome::Failure(self.unexpected(BLACK_SWAN_FALLBACK_STATUS));
                }
            }
        } else {
            None
        };
        self.dispatch(endpoint, method, body, validator)
    }

    /// Issue one request with a raw binary body (image uploads). The server
    /// infers the content type from the filetype segment of the URL.
    pub fn send_blob<V>(
        &self,
        endpoint: &str,
        method: HttpMethod,
        blob: &[u8],
        validator: &V,
    ) -> Outcome<V::Output>
    where
        V: Validator,
    {
        let body = method.has_body().then(|| RequestBody::Bytes(blob.to_vec()));
        self.dispatch(endpoint, method, body, validator)
    }

    fn dispatch<V: Validator>(
        &self,
        endpoint: &str,
        method: HttpMethod,
        body: Option<RequestBody>,
        validator: &V,
    ) -> Outcome<V::Output> {
        let request = HttpRequest {
            method,
            url: format!("{}{}", self.base_url, endpoint),
            body,
        };
        debug!("{} {}", method.as_str(), request.url);

        let response = match self.transport.execute(request) {
            Ok(response) => response,
            Err(e) => {
                warn!("{} {}{}: {e}", method.as_str(), self.base_url, endpoint);
                return Outcome::Failure(self.unexpected(BLACK_SWAN_FALLBACK_STATUS));
            }
        };

        let json: Value = match serde_json::from_str(&response.body) {
            Ok(json) => json,
            Err(e) => {
                warn!("non-JSON body from {endpoint} (status {}): {e}", response.status);
                return Outcome::Failure(self.unexpected(BLACK_SWAN_FALLBACK_STATUS));
            }
        };

        if !response.is_success() {
            return Outcome::Failure(self.classify_error(endpoint, response.status, json));
        }

        // 2xx bodies are `{ "payload": <T> }`.
        let payload = match json {
            Value::Object(mut map) => map.remove("payload"),
            _ => None,
        };
        let Some(payload) = payload else {
            warn!("2xx response from {endpoint} without a payload member");
            return Outcome::Failure(self.unexpected(BLACK_SWAN_FALLBACK_STATUS));
        };

        match validator.validate(payload) {
            Ok(value) => Outcome::Success(value),
            Err(e) => {
                warn!("payload from {endpoint} failed validation: {e}");
                Outcome::Failure(self.unexpected(BLACK_SWAN_FALLBACK_STATUS))
            }
        }
    }

    /// Classify a non-2xx response whose body parsed as JSON.
    fn classify_error(&self, endpoint: &str, status: u16, body: Value) -> Failure {
        match Schema::<ErrorBody>::new().validate(body) {
            Ok(ErrorBody { err }) => match status {
                400 => {
                    self.reporter.report_field_error(&err, status);
                    Failure { status, err }
                }
                // Redirect/empty-state logic at the page level owns these.
                403 | 404 => Failure { status, err },
                _ => {
                    warn!("unexpected status {status} from {endpoint}: {err}");
                    self.unexpected(status)
                }
            },
            Err(e) => {
                warn!("malformed error envelope from {endpoint} (status {status}): {e}");
                self.unexpected(status)
            }
        }
    }

    /// Report through the black-swan channel and build the masked failure.
    fn unexpected(&self, status: u16) -> Failure {
        self.reporter.report_unexpected(status, MASKED_ERROR_MESSAGE);
        Failure {
            status,
            err: MASKED_ERROR_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BlackSwan, FieldError};
    use crate::http::{HttpResponse, TransportError};
    use crate::report::ErrorSignals;
    use crate::types::Ack;
    use serde_json::json;
    use std::sync::Mutex;

    /// Returns a canned response (or transport error) and records every
    /// request it executed.
    struct ScriptedTransport {
        reply: Result<HttpResponse, TransportError>,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        fn replying(status: u16, body: &str) -> Self {
            Self {
                reply: Ok(HttpResponse {
                    status,
                    body: body.to_string(),
                }),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(cause: &str) -> Self {
            Self {
                reply: Err(TransportError(cause.to_string())),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<HttpRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl Transport for ScriptedTransport {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.seen.lock().unwrap().push(request);
            self.reply.clone()
        }
    }

    #[test]
    fn get_request_carries_no_body() {
        let transport = ScriptedTransport::replying(200, r#"{"payload":{}}"#);
        let signals = ErrorSignals::new();
        let client = ApiClient::new("http://host", &transport, &signals);

        client.send(
            "/profiles/alice",
            HttpMethod::Get,
            &json!({"username": "alice"}),
            &Schema::<Ack>::new(),
        );

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].body.is_none());
        assert_eq!(requests[0].url, "http://host/profiles/alice");
    }

    #[test]
    fn head_request_carries_no_body() {
        let transport = ScriptedTransport::replying(200, r#"{"payload":{}}"#);
        let signals = ErrorSignals::new();
        let client = ApiClient::new("http://host", &transport, &signals);

        client.send("/logged-in", HttpMethod::Head, &json!({"x": 1}), &Schema::<Ack>::new());

        assert!(transport.requests()[0].body.is_none());
    }

    #[test]
    fn post_body_is_json_serialization_of_payload() {
        let transport = ScriptedTransport::replying(200, r#"{"payload":{}}"#);
        let signals = ErrorSignals::new();
        let client = ApiClient::new("http://host", &transport, &signals);

        client.send(
            "/login",
            HttpMethod::Post,
            &json!({"username": "a", "password": "b"}),
            &Schema::<Ack>::new(),
        );

        let requests = transport.requests();
        let Some(RequestBody::Json(body)) = &requests[0].body else {
            panic!("expected a JSON body");
        };
        let parsed: Value = serde_json::from_str(body).unwrap();
        assert_eq!(parsed, json!({"username": "a", "password": "b"}));
    }

    #[test]
    fn delete_carries_a_body() {
        let transport = ScriptedTransport::replying(200, r#"{"payload":{}}"#);
        let signals = ErrorSignals::new();
        let client = ApiClient::new("http://host", &transport, &signals);

        client.send("/links/3", HttpMethod::Delete, &json!({}), &Schema::<Ack>::new());

        assert!(matches!(
            transport.requests()[0].body,
            Some(RequestBody::Json(_))
        ));
    }

    #[test]
    fn send_blob_uses_raw_bytes() {
        let transport = ScriptedTransport::replying(200, r#"{"payload":{"href":"/img/1"}}"#);
        let signals = ErrorSignals::new();
        let client = ApiClient::new("http://host", &transport, &signals);

        client.send_blob(
            "/profiles/image/png",
            HttpMethod::Put,
            &[0xffu8, 0xd8, 0xff],
            &Schema::<crate::types::ImageUploaded>::new(),
        );

        let requests = transport.requests();
        assert_eq!(
            requests[0].body,
            Some(RequestBody::Bytes(vec![0xff, 0xd8, 0xff]))
        );
    }

    #[test]
    fn success_returns_validated_payload_without_signals() {
        let transport = ScriptedTransport::replying(200, r#"{"payload":{}}"#);
        let signals = ErrorSignals::new();
        let client = ApiClient::new("http://host", &transport, &signals);

        let outcome = client.send("/login", HttpMethod::Post, &json!({}), &Schema::<Ack>::new());

        assert!(outcome.is_success());
        assert!(signals.black_swan().is_none());
        assert!(signals.field_errors().is_empty());
    }

    #[test]
    fn success_without_payload_member_is_black_swan() {
        let transport = ScriptedTransport::replying(200, r#"{"result":true}"#);
        let signals = ErrorSignals::new();
        let client = ApiClient::new("http://host", &transport, &signals);

        let outcome = client.send("/login", HttpMethod::Post, &json!({}), &Schema::<Ack>::new());

        assert!(!outcome.is_success());
        let swan = signals.black_swan().unwrap();
        assert_eq!(swan.status, 500);
        assert_eq!(swan.message, MASKED_ERROR_MESSAGE);
        assert!(signals.field_errors().is_empty());
    }

    #[test]
    fn success_with_rejected_payload_is_black_swan() {
        let transport = ScriptedTransport::replying(200, r#"{"payload":{"err":7}}"#);
        let signals = ErrorSignals::new();
        let client = ApiClient::new("http://host", &transport, &signals);

        let outcome = client.send(
            "/whoami",
            HttpMethod::Get,
            &json!({}),
            &Schema::<ErrorBody>::new(),
        );

        assert!(!outcome.is_success());
        assert!(signals.black_swan().is_some());
    }

    #[test]
    fn status_400_goes_to_the_field_log_only() {
        let transport = ScriptedTransport::replying(400, r#"{"err":"bad credentials"}"#);
        let signals = ErrorSignals::new();
        let client = ApiClient::new("http://host", &transport, &signals);

        let outcome = client.send(
            "/login",
            HttpMethod::Post,
            &json!({"username": "a", "password": "b"}),
            &Schema::<Ack>::new(),
        );

        assert_eq!(
            outcome.failure(),
            Some(&Failure {
                status: 400,
                err: "bad credentials".to_string()
            })
        );
        assert_eq!(
            signals.field_errors(),
            vec![FieldError {
                message: "bad credentials".to_string(),
                status_code: 400
            }]
        );
        assert!(signals.black_swan().is_none());
    }

    #[test]
    fn status_403_and_404_touch_neither_signal() {
        for status in [403u16, 404] {
            let transport = ScriptedTransport::replying(status, r#"{"err":"nope"}"#);
            let signals = ErrorSignals::new();
            let client = ApiClient::new("http://host", &transport, &signals);

            let outcome =
                client.send("/profiles/ghost", HttpMethod::Get, &json!({}), &Schema::<Ack>::new());

            assert_eq!(outcome.failure().unwrap().status, status);
            assert_eq!(outcome.failure().unwrap().err, "nope");
            assert!(signals.black_swan().is_none(), "status {status}");
            assert!(signals.field_errors().is_empty(), "status {status}");
        }
    }

    #[test]
    fn status_500_is_black_swan_with_masked_message() {
        let transport = ScriptedTransport::replying(500, r#"{"err":"boom"}"#);
        let signals = ErrorSignals::new();
        let client = ApiClient::new("http://host", &transport, &signals);

        let outcome = client.send("/login", HttpMethod::Post, &json!({}), &Schema::<Ack>::new());

        assert_eq!(
            outcome.failure(),
            Some(&Failure {
                status: 500,
                err: MASKED_ERROR_MESSAGE.to_string()
            })
        );
        assert_eq!(
            signals.black_swan(),
            Some(BlackSwan {
                status: 500,
                message: MASKED_ERROR_MESSAGE.to_string()
            })
        );
        assert!(signals.field_errors().is_empty());
    }

    #[test]
    fn malformed_error_envelope_is_black_swan() {
        let transport = ScriptedTransport::replying(400, r#"{"message":"wrong shape"}"#);
        let signals = ErrorSignals::new();
        let client = ApiClient::new("http://host", &transport, &signals);

        let outcome = client.send("/login", HttpMethod::Post, &json!({}), &Schema::<Ack>::new());

        assert!(!outcome.is_success());
        assert_eq!(signals.black_swan().unwrap().status, 400);
        assert!(signals.field_errors().is_empty());
    }

    #[test]
    fn non_json_body_is_black_swan_with_fallback_status() {
        let transport = ScriptedTransport::replying(200, "<html>gateway error</html>");
        let signals = ErrorSignals::new();
        let client = ApiClient::new("http://host", &transport, &signals);

        let outcome = client.send("/login", HttpMethod::Post, &json!({}), &Schema::<Ack>::new());

        assert!(!outcome.is_success());
        assert_eq!(signals.black_swan().unwrap().status, 500);
    }

    #[test]
    fn transport_failure_is_black_swan_with_fallback_status() {
        let transport = ScriptedTransport::failing("connection refused");
        let signals = ErrorSignals::new();
        let client = ApiClient::new("http://host", &transport, &signals);

        let outcome = client.send("/login", HttpMethod::Post, &json!({}), &Schema::<Ack>::new());

        assert_eq!(outcome.failure().unwrap().status, 500);
        assert_eq!(signals.black_swan().unwrap().message, MASKED_ERROR_MESSAGE);
    }

    #[test]
    fn repeated_calls_classify_identically_per_call() {
        let transport = ScriptedTransport::replying(400, r#"{"err":"taken"}"#);
        let signals = ErrorSignals::new();
        let client = ApiClient::new("http://host", &transport, &signals);

        let first = client.send("/register", HttpMethod::Post, &json!({}), &Schema::<Ack>::new());
        let second = client.send("/register", HttpMethod::Post, &json!({}), &Schema::<Ack>::new());

        assert_eq!(first, second);
        let log = signals.field_errors();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0], log[1]);
        assert!(signals.black_swan().is_none());
    }

    #[test]
    fn trailing_slash_is_stripped_from_base_url() {
        let transport = ScriptedTransport::replying(200, r#"{"payload":{}}"#);
        let signals = ErrorSignals::new();
        let client = ApiClient::new("http://host/", &transport, &signals);

        client.send("/login", HttpMethod::Post, &json!({}), &Schema::<Ack>::new());

        assert_eq!(transport.requests()[0].url, "http://host/login");
    }
}
