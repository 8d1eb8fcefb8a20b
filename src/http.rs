//! Request Dispatcher
//!
//! The one place where HTTP happens. Every resource accessor hands a relative
//! path, a method and an optional body to [`HttpDispatcher::dispatch`], which
//! performs exactly one request against the base URL and normalizes the
//! response into an [`ApiResult`].

use crate::result::{ApiError, ApiResult};
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Production API root
pub const DEFAULT_BASE_URL: &str = "https://api.hetzner.cloud/v1";

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Placeholder for calls that send no body
pub(crate) const NO_BODY: Option<&()> = None;

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Shared HTTP dispatcher
///
/// Holds the bearer token and base URL for the lifetime of the client. Cheap
/// to clone: clones share the connection pool and the same credential.
#[derive(Clone)]
pub struct HttpDispatcher {
    client: Client,
    token: Arc<str>,
    base_url: Arc<str>,
}

impl fmt::Debug for HttpDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpDispatcher")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl HttpDispatcher {
    /// Create a dispatcher for `base_url` authenticating with `token`
    pub fn new(token: &str, base_url: &str) -> Result<Self> {
        url::Url::parse(base_url).with_context(|| format!("Invalid base URL: {}", base_url))?;

        let client = Client::builder()
            .user_agent(concat!("hcloud-api/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            token: Arc::from(token),
            base_url: Arc::from(base_url.trim_end_matches('/')),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn token(&self) -> &str {
        &self.token
    }

    /// Perform one request and normalize the response
    ///
    /// `path` is appended verbatim to the base URL. Caller headers are sent
    /// too, but `Authorization` and `Content-Type` always carry the
    /// dispatcher's values. A 204 is decoded from `null`; any other body must
    /// be JSON. Non-2xx statuses resolve to [`ApiResult::Failure`] carrying
    /// the parsed body unchanged.
    pub async fn dispatch<T, B>(
        &self,
        method: Method,
        path: &str,
        headers: HeaderMap,
        body: Option<&B>,
    ) -> Result<ApiResult<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("{} {}", method, url);

        let mut request_headers = headers;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.token))
            .context("API token contains characters not allowed in a header")?;
        request_headers.insert(AUTHORIZATION, bearer);
        request_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut request = self.client.request(method, &url).headers(request_headers);

        if let Some(body) = body {
            let json = serde_json::to_string(body).context("Failed to serialize request body")?;
            request = request.body(json);
        }

        let response = request.send().await.context("Failed to send request")?;

        let status = response.status();
        tracing::debug!("{} -> {}", url, status);

        let text = response
            .text()
            .await
            .context("Failed to read response body")?;

        let parsed = if status == StatusCode::NO_CONTENT {
            Value::Null
        } else {
            serde_json::from_str::<Value>(&text).with_context(|| {
                format!("Failed to parse response JSON (HTTP {})", status.as_u16())
            })?
        };

        if !status.is_success() {
            tracing::warn!("API error: {} - {}", status, sanitize_for_log(&text));
            return Ok(ApiResult::Failure(ApiError::from_body(parsed)));
        }

        let payload = serde_json::from_value::<T>(parsed)
            .context("Failed to decode response payload")?;

        Ok(ApiResult::Success(payload))
    }

    /// GET `path`
    pub async fn get<T>(&self, path: &str) -> Result<ApiResult<T>>
    where
        T: DeserializeOwned,
    {
        self.dispatch(Method::GET, path, HeaderMap::new(), NO_BODY)
            .await
    }

    /// POST `path` with a JSON body
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<ApiResult<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.dispatch(Method::POST, path, HeaderMap::new(), Some(body))
            .await
    }

    /// POST `path` without a body (most action commands)
    pub async fn post_empty<T>(&self, path: &str) -> Result<ApiResult<T>>
    where
        T: DeserializeOwned,
    {
        self.dispatch(Method::POST, path, HeaderMap::new(), NO_BODY)
            .await
    }

    /// PUT `path` with a JSON body
    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<ApiResult<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.dispatch(Method::PUT, path, HeaderMap::new(), Some(body))
            .await
    }

    /// DELETE `path`
    pub async fn delete<T>(&self, path: &str) -> Result<ApiResult<T>>
    where
        T: DeserializeOwned,
    {
        self.dispatch(Method::DELETE, path, HeaderMap::new(), NO_BODY)
            .await
    }
}
