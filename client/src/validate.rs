//! Schema validation as a polymorphic capability.
//!
//! # Design
//! The browser client validated decoded JSON with Joi schema objects; here
//! the same role is a trait so call sites stay generic over how a payload is
//! checked. [`Schema`] is the stock implementation — serde deserialization
//! *is* the schema — and custom validators can layer extra constraints on
//! top without the pipeline caring.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ValidationError;

/// Checks a decoded JSON value against an expected shape, producing the
/// typed form or a [`ValidationError`].
pub trait Validator {
    type Output;

    fn validate(&self, candidate: Value) -> Result<Self::Output, ValidationError>;
}

/// Serde-backed validator: `Schema::<T>::new()` accepts exactly the values
/// that deserialize into `T`. Unknown members are tolerated, matching the
/// permissive envelopes the server actually sends.
#[derive(Debug, Clone, Copy)]
pub struct Schema<T>(PhantomData<fn() -> T>);

impl<T> Schema<T> {
    pub fn new() -> Self {
        Schema(PhantomData)
    }
}

impl<T> Default for Schema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DeserializeOwned> Validator for Schema<T> {
    type Output = T;

    fn validate(&self, candidate: Value) -> Result<T, ValidationError> {
        serde_json::from_value(candidate).map_err(|e| ValidationError(e.to_string()))
    }
}

/// The `{ err: string }` envelope every non-2xx response is expected to
/// carry. A `result: bool` member sometimes rides along; it is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub err: String,
}
