//! API Results
//!
//! Every call made through the dispatcher resolves to an [`ApiResult`]:
//! either the decoded success payload or the provider's structured error
//! body. Transport problems never end up here; they surface as `Err` on the
//! outer `anyhow::Result`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Outcome of a call the remote API answered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "payload", rename_all = "snake_case")]
pub enum ApiResult<T> {
    /// 2xx response, payload decoded as `T` (`()` for 204 No Content)
    Success(T),
    /// Non-2xx response, error body passed through as-is
    Failure(ApiError),
}

impl<T> ApiResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ApiResult::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ApiResult::Failure(_))
    }

    /// Consume the result, keeping only the success payload
    pub fn success(self) -> Option<T> {
        match self {
            ApiResult::Success(payload) => Some(payload),
            ApiResult::Failure(_) => None,
        }
    }

    /// Consume the result, keeping only the error payload
    pub fn failure(self) -> Option<ApiError> {
        match self {
            ApiResult::Success(_) => None,
            ApiResult::Failure(error) => Some(error),
        }
    }

    pub fn as_ref(&self) -> ApiResult<&T> {
        match self {
            ApiResult::Success(payload) => ApiResult::Success(payload),
            ApiResult::Failure(error) => ApiResult::Failure(error.clone()),
        }
    }

    /// Transform the success payload, leaving failures untouched
    pub fn map<U, F>(self, f: F) -> ApiResult<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            ApiResult::Success(payload) => ApiResult::Success(f(payload)),
            ApiResult::Failure(error) => ApiResult::Failure(error),
        }
    }

    /// Convert into a std `Result` so callers can use `?`
    pub fn into_result(self) -> Result<T, ApiError> {
        match self {
            ApiResult::Success(payload) => Ok(payload),
            ApiResult::Failure(error) => Err(error),
        }
    }
}

impl<T> From<ApiResult<T>> for Result<T, ApiError> {
    fn from(result: ApiResult<T>) -> Self {
        result.into_result()
    }
}

/// Error body returned by the API on any non-2xx status
///
/// The body is kept exactly as received, whatever its shape. The typed
/// accessors read the usual `{"error": {"code", "message", ...}}` layout
/// and fall back to empty values when a key is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiError {
    body: Value,
}

/// The `error` object inside an [`ApiError`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Machine readable code, e.g. `not_found`, `unauthorized`, `invalid_input`
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
    /// Keys not modelled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Validation error for a single request field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub name: String,
    #[serde(default)]
    pub messages: Vec<String>,
}

impl ApiError {
    pub fn from_body(body: Value) -> Self {
        Self { body }
    }

    /// Raw error body as sent by the API
    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn into_body(self) -> Value {
        self.body
    }

    pub fn code(&self) -> &str {
        self.error_str("code")
    }

    pub fn message(&self) -> &str {
        self.error_str("message")
    }

    /// Typed view of the `error` object, if the body has one
    pub fn details(&self) -> Option<ErrorDetails> {
        self.body
            .get("error")
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
    }

    pub fn field_errors(&self) -> Vec<FieldError> {
        self.details()
            .map(|d| d.field_errors())
            .unwrap_or_default()
    }

    fn error_str(&self, key: &str) -> &str {
        self.body
            .get("error")
            .and_then(|e| e.get(key))
            .and_then(Value::as_str)
            .unwrap_or("")
    }
}

impl ErrorDetails {
    /// Field level errors, whether sent at the top level or under `details.fields`
    pub fn field_errors(&self) -> Vec<FieldError> {
        let mut errors = self.fields.clone();

        let nested = self
            .details
            .as_ref()
            .and_then(|d| d.get("fields"))
            .cloned()
            .and_then(|v| serde_json::from_value::<Vec<FieldError>>(v).ok())
            .unwrap_or_default();

        errors.extend(nested);
        errors
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code(), self.message()) {
            ("", "") => write!(f, "{}", self.body),
            (code, "") => write!(f, "{}", code),
            (code, message) => write!(f, "{}: {}", code, message),
        }
    }
}

impl std::error::Error for ApiError {}
