//! Verify request building and response parsing against JSON test vectors
//! stored in `test-vectors/`.
//!
//! Each vector file describes the expected request, a simulated response,
//! and the expected outcome. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use request_core::api::{POSTS_PATH, USERS_PATH};
use request_core::{
    BuildMode, ClientConfig, ClientOptions, Http, HttpMethod, HttpResponse, Post, RequestConfig,
    RequestError, User,
};

const BASE_URL: &str = "http://localhost:3000";

fn client() -> Http {
    let config = ClientConfig::base_from(BuildMode::Development, |_| None)
        .merge(ClientOptions::default().base_url(BASE_URL));
    Http::new(config)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "PATCH" => HttpMethod::Patch,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn simulated(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().as_bytes().to_vec(),
    }
}

// ---------------------------------------------------------------------------
// Status table
// ---------------------------------------------------------------------------

#[test]
fn status_test_vectors() {
    let raw = include_str!("../../test-vectors/status.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let response = simulated(case);
        let expected_message = case["expected_message"].as_str().unwrap();

        let err = c.parse_payload::<serde_json::Value>(&response).unwrap_err();
        assert_eq!(err.to_string(), expected_message, "{name}: payload message");
        assert_eq!(err.status(), Some(response.status), "{name}: status");

        let err = c.parse_file(response).unwrap_err();
        assert!(matches!(err, RequestError::Status { .. }), "{name}: file error kind");
        assert_eq!(err.to_string(), expected_message, "{name}: file message");
    }
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

#[test]
fn posts_test_vectors() {
    let raw = include_str!("../../test-vectors/posts.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c.build_request(&RequestConfig::get(POSTS_PATH)).unwrap();
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: url");
        assert!(req.body.is_none(), "{name}: body should be None");

        // Verify parse
        let posts: Vec<Post> = c.parse_payload(&simulated(case)).unwrap();
        let expected: Vec<Post> = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(posts, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[test]
fn users_test_vectors() {
    let raw = include_str!("../../test-vectors/users.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c.build_request(&RequestConfig::get(USERS_PATH)).unwrap();
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: url");

        // Verify parse
        let users: Vec<User> = c.parse_payload(&simulated(case)).unwrap();
        let expected: Vec<User> = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(users, expected, "{name}: parsed result");
    }
}
