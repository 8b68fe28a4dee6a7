//! HTTP transport types exchanged between the client and the agent.
//!
//! # Design
//! Requests and responses are plain data. `Http` builds an `HttpRequest`
//! from a `RequestConfig`, hands it to the agent, and turns the agent's reply
//! into an `HttpResponse` before any status or payload interpretation. Both
//! halves of that pipeline are pure functions over these types, so they are
//! tested without a network.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::RequestError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Per-call request options.
///
/// `url` is either absolute or a path resolved against the instance base URL
/// (or `base_url` when set). `show_fail_toast` left as `None` falls back to
/// the instance default.
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    pub url: String,
    pub method: HttpMethod,
    pub base_url: Option<String>,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    pub show_fail_toast: Option<bool>,
}

impl RequestConfig {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            ..Self::default()
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attach a JSON body. Fails when `body` does not serialize.
    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self, RequestError> {
        let value = serde_json::to_value(body).map_err(|e| RequestError::Encode(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    pub fn show_fail_toast(mut self, show: bool) -> Self {
        self.show_fail_toast = Some(show);
        self
    }
}

/// A fully resolved request, ready for the agent.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

/// A response as returned by the agent, before interpretation.
///
/// This is what the file client hands back to callers: downloads need the
/// status and headers (content type, disposition) next to the raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First header value matching `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Body as text, replacing invalid UTF-8 sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the body as JSON. An empty body decodes as `null`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, RequestError> {
        let result = if self.body.iter().all(u8::is_ascii_whitespace) {
            serde_json::from_value(serde_json::Value::Null)
        } else {
            serde_json::from_slice(&self.body)
        };
        result.map_err(|e| RequestError::Decode(e.to_string()))
    }
}
