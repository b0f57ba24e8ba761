//! Synchronous client for the linkhub link-in-bio API.
//!
//! # Overview
//! Everything funnels through one validated-fetch pipeline: build a request,
//! execute it through an injected [`Transport`], parse the JSON body,
//! validate it against a caller-supplied schema, and classify every failure
//! exactly once through an injected [`Reporter`]. Typed endpoint wrappers
//! for the whole API surface (auth, profiles, links, follows, search,
//! notifications, insights) are thin callers of that pipeline.
//!
//! # Design
//! - `ApiClient` is stateless between calls — base URL plus two injected
//!   collaborators, nothing else.
//! - The crate performs no I/O itself; the `Transport` boundary keeps the
//!   pipeline deterministic and lets tests script responses.
//! - Failures never escape [`ApiClient::send`]: every path returns an
//!   [`Outcome`], and side-channel reporting (black-swan slot, field-error
//!   log) happens at most once per call.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod queries;
pub mod report;
pub mod types;
pub mod validate;

pub use client::{ApiClient, Outcome};
pub use error::{
    BlackSwan, Failure, FieldError, ValidationError, BLACK_SWAN_FALLBACK_STATUS,
    MASKED_ERROR_MESSAGE,
};
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestBody, Transport, TransportError};
pub use report::{ErrorSignals, Reporter};
pub use validate::{ErrorBody, Schema, Validator};
