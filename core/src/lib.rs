//! Shared HTTP request layer for the placeholder API.
//!
//! # Overview
//! Two process-wide clients (normal and file) wrap a configured `ureq`
//! agent. Every failed call is mapped to a fixed user-facing message, can
//! raise a toast through a pluggable `Notifier`, and comes back as one
//! `RequestError`. `get_posts` and `get_users` sit on top.
//!
//! # Design
//! - `Http` is immutable after construction, so the shared instances are
//!   plain `OnceLock` statics that any thread may use.
//! - Request building and response parsing are pure; only `execute` touches
//!   the network.
//! - `status_message` is the whole status table, callable without I/O.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod notify;
pub mod types;

pub use api::{fetch_posts, fetch_users, get_posts, get_users};
pub use client::{request, request_file, Http};
pub use config::{BuildMode, ClientConfig, ClientOptions};
pub use error::{status_message, RequestError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestConfig};
pub use notify::{LogNotifier, MemoryNotifier, Notifier, Toast};
pub use types::{Envelope, Post, User};
