//! Endpoints of the placeholder backend.

use crate::client::Http;
use crate::error::RequestError;
use crate::http::RequestConfig;
use crate::types::{Post, User};

pub const POSTS_PATH: &str = "/posts";
pub const USERS_PATH: &str = "/users";

/// List posts through the shared client. Failures raise no toast.
pub fn get_posts() -> Result<Vec<Post>, RequestError> {
    fetch_posts(Http::instance(None))
}

/// List users through the shared client.
pub fn get_users() -> Result<Vec<User>, RequestError> {
    fetch_users(Http::instance(None))
}

pub fn fetch_posts(http: &Http) -> Result<Vec<Post>, RequestError> {
    http.send(&RequestConfig::get(POSTS_PATH).show_fail_toast(false))
}

pub fn fetch_users(http: &Http) -> Result<Vec<User>, RequestError> {
    http.send(&RequestConfig::get(USERS_PATH))
}
