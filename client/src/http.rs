//! HTTP transport types and the injectable transport seam.
//!
//! # Design
//! Requests and responses are plain data. The client crate builds
//! `HttpRequest` values and classifies `HttpResponse` values without ever
//! touching the network — a caller-supplied [`Transport`] executes the
//! actual round-trip. This keeps the classification pipeline deterministic
//! and lets server-side callers forward per-request credentials by swapping
//! the transport, the same seam the browser client exposed as a `fetch`
//! override.
//!
//! All fields use owned types (`String`, `Vec`) so scripted transports in
//! tests can construct and consume them freely.

use std::fmt;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
}

impl HttpMethod {
    /// Whether requests with this method carry a body.
    ///
    /// GET and HEAD never do, even when a payload value is supplied; every
    /// other verb always does, DELETE included.
    pub fn has_body(self) -> bool {
        !matches!(self, HttpMethod::Get | HttpMethod::Head)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
        }
    }
}

/// Body of an outgoing request.
///
/// `Json` carries the serialized payload for ordinary endpoints; `Bytes`
/// carries raw image data for the upload endpoints, where the server infers
/// the content type from the URL's filetype segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Json(String),
    Bytes(Vec<u8>),
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<RequestBody>,
}

/// An HTTP response described as plain data.
///
/// Constructed by the [`Transport`] after executing an `HttpRequest`, then
/// handed back to the client for status interpretation and validation.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// Whether the status falls in the 2xx success range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request could not be completed at the transport level (connection
/// refused, DNS failure, broken stream). Carries a human-readable cause for
/// logging; the client masks it before anything user-visible sees it.
#[derive(Debug, Clone)]
pub struct TransportError(pub String);

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transport failure: {}", self.0)
    }
}

impl std::error::Error for TransportError {}

/// Executes one HTTP round-trip.
///
/// Implementations must return `Ok` for every response the server actually
/// produced, whatever its status code — only failures to obtain a response
/// at all are `Err`. Status interpretation belongs to the client.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}
