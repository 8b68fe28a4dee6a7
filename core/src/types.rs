//! Records served by the placeholder backend, and the result envelope.
//!
//! # Design
//! These mirror the mock server's schema but are defined independently;
//! integration tests catch drift. Fields the backend sends that are not
//! listed here are ignored, so the real placeholder host decodes too.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: u64,
    pub id: u64,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
}

/// Standard `{ code, message, data }` wrapper used by enveloped backends.
///
/// `code` arrives as either a number or a string depending on the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    pub code: serde_json::Value,
    #[serde(default)]
    pub message: String,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn into_data(self) -> T {
        self.data
    }
}
