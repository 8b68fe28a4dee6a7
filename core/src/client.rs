//! Shared HTTP client with unified failure handling.
//!
//! # Design
//! `Http` owns a configured `ureq::Agent` and carries no mutable state after
//! construction. A call runs in three steps: `build_request` resolves a
//! `RequestConfig` into an `HttpRequest`, the agent executes it, and
//! `parse_payload` / `parse_file` interpret the `HttpResponse`. The first and
//! last steps are pure. Every failure, whatever step produced it, goes
//! through one handler that logs it and raises the toast.
//!
//! Two process-wide instances exist: the normal one, whose calls return the
//! decoded body, and the file one, whose calls return the whole response.
//! Each is created on first access and never replaced.

use std::fmt;
use std::sync::OnceLock;

use serde::de::DeserializeOwned;

use crate::config::{ClientConfig, ClientOptions};
use crate::error::RequestError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestConfig};
use crate::notify::Toast;

static INSTANCE: OnceLock<Http> = OnceLock::new();
static FILE_INSTANCE: OnceLock<Http> = OnceLock::new();

pub struct Http {
    config: ClientConfig,
    agent: ureq::Agent,
}

impl fmt::Debug for Http {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Http").field("config", &self.config).finish_non_exhaustive()
    }
}

impl Http {
    /// Build a standalone instance. The shared instances are built here too.
    pub fn new(config: ClientConfig) -> Self {
        // Status handling happens in `parse_*`, so 4xx/5xx must come back as data.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(config.timeout))
            .build()
            .new_agent();
        Self { config, agent }
    }

    /// The shared normal instance, created on first call from the base
    /// configuration merged with `options`. Later options are ignored.
    pub fn instance(options: Option<ClientOptions>) -> &'static Http {
        shared(&INSTANCE, "normal", options)
    }

    /// The shared file instance. Independent of `instance`.
    pub fn file_instance(options: Option<ClientOptions>) -> &'static Http {
        shared(&FILE_INSTANCE, "file", options)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Issue a request and decode the response body as `T`.
    pub fn send<T: DeserializeOwned>(&self, config: &RequestConfig) -> Result<T, RequestError> {
        self.round_trip(config)
            .and_then(|response| self.parse_payload(&response))
            .map_err(|err| self.fail(config, err))
    }

    /// Issue a request and return the full response.
    pub fn send_file(&self, config: &RequestConfig) -> Result<HttpResponse, RequestError> {
        self.round_trip(config)
            .and_then(|response| self.parse_file(response))
            .map_err(|err| self.fail(config, err))
    }

    pub fn build_request(&self, config: &RequestConfig) -> Result<HttpRequest, RequestError> {
        let base_url = config.base_url.as_deref().unwrap_or(&self.config.base_url);
        let url = resolve_url(base_url, &config.url);

        let mut headers = self.config.headers.clone();
        for (name, value) in &config.headers {
            set_header(&mut headers, name, value);
        }

        let body = match &config.body {
            Some(value) => {
                let bytes =
                    serde_json::to_vec(value).map_err(|e| RequestError::Encode(e.to_string()))?;
                if !headers.iter().any(|(name, _)| name.eq_ignore_ascii_case("content-type")) {
                    headers.push(("content-type".to_string(), "application/json".to_string()));
                }
                Some(bytes)
            }
            None => None,
        };

        Ok(HttpRequest {
            method: config.method,
            url,
            headers,
            body,
        })
    }

    pub fn parse_payload<T: DeserializeOwned>(&self, response: &HttpResponse) -> Result<T, RequestError> {
        check_status(response)?;
        response.json()
    }

    pub fn parse_file(&self, response: HttpResponse) -> Result<HttpResponse, RequestError> {
        check_status(&response)?;
        Ok(response)
    }

    fn round_trip(&self, config: &RequestConfig) -> Result<HttpResponse, RequestError> {
        let request = self.build_request(config)?;
        tracing::debug!(method = request.method.as_str(), url = %request.url, "sending request");
        self.execute(&request)
    }

    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, RequestError> {
        let agent = &self.agent;
        let url = request.url.as_str();
        let headers = &request.headers;

        let result = match (request.method, request.body.as_deref()) {
            (HttpMethod::Get, _) => with_headers(agent.get(url), headers).call(),
            (HttpMethod::Delete, _) => with_headers(agent.delete(url), headers).call(),
            (HttpMethod::Post, Some(body)) => with_headers(agent.post(url), headers).send(body),
            (HttpMethod::Post, None) => with_headers(agent.post(url), headers).send_empty(),
            (HttpMethod::Put, Some(body)) => with_headers(agent.put(url), headers).send(body),
            (HttpMethod::Put, None) => with_headers(agent.put(url), headers).send_empty(),
            (HttpMethod::Patch, Some(body)) => with_headers(agent.patch(url), headers).send(body),
            (HttpMethod::Patch, None) => with_headers(agent.patch(url), headers).send_empty(),
        };
        let mut response = result.map_err(|e| RequestError::transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        // The status is already known here, so a failed read is not a transport error.
        let body = response
            .body_mut()
            .with_config()
            .limit(self.config.max_body_bytes.unwrap_or(u64::MAX))
            .read_to_vec()
            .map_err(|e| RequestError::body(status, e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    /// Log a failure and raise the toast when the call allows it.
    fn fail(&self, config: &RequestConfig, err: RequestError) -> RequestError {
        if !err.is_user_facing() {
            tracing::error!(url = %config.url, error = %err, "request could not be completed");
            return err;
        }

        match &err {
            RequestError::Transport { detail, .. } => {
                tracing::warn!(url = %config.url, %detail, "request failed without a response");
            }
            RequestError::Body { status, detail, .. } => {
                tracing::warn!(url = %config.url, status, %detail, "response body could not be read");
            }
            _ => {
                tracing::warn!(url = %config.url, status = ?err.status(), "request failed: {err}");
            }
        }

        if config.show_fail_toast.unwrap_or(self.config.show_fail_toast) {
            self.config.notifier.notify(&Toast::new(err.to_string()));
        }
        err
    }
}

fn shared(
    cell: &'static OnceLock<Http>,
    name: &'static str,
    options: Option<ClientOptions>,
) -> &'static Http {
    if let Some(existing) = cell.get() {
        if options.is_some() {
            tracing::debug!(instance = name, "client already initialized, ignoring options");
        }
        return existing;
    }
    cell.get_or_init(|| {
        let config = ClientConfig::base().merge(options.unwrap_or_default());
        tracing::debug!(instance = name, base_url = %config.base_url, "initializing shared client");
        Http::new(config)
    })
}

/// Issue a request through the shared normal instance.
pub fn request<T: DeserializeOwned>(config: &RequestConfig) -> Result<T, RequestError> {
    Http::instance(None).send(config)
}

/// Issue a request through the shared file instance.
pub fn request_file(config: &RequestConfig) -> Result<HttpResponse, RequestError> {
    Http::file_instance(None).send_file(config)
}

fn check_status(response: &HttpResponse) -> Result<(), RequestError> {
    if response.is_success() {
        return Ok(());
    }
    Err(RequestError::from_status(response.status))
}

/// Join `url` onto `base_url` with exactly one slash. Absolute URLs and an
/// empty base leave `url` untouched.
fn resolve_url(base_url: &str, url: &str) -> String {
    if is_absolute(url) || base_url.is_empty() {
        return url.to_string();
    }
    let base = base_url.trim_end_matches('/');
    if url.is_empty() {
        return base.to_string();
    }
    format!("{}/{}", base, url.trim_start_matches('/'))
}

fn is_absolute(url: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Replace any header named `name` (case-insensitive) with `value`.
fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: &str) {
    headers.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
    headers.push((name.to_string(), value.to_string()));
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
