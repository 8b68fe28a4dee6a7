use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: u64,
    pub id: u64,
    pub title: String,
    pub body: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub website: String,
}

/// Everything the server answers with, including injected failures.
#[derive(Clone, Debug, Default)]
pub struct Fixtures {
    pub posts: Vec<Post>,
    pub users: Vec<User>,
    pub files: HashMap<String, Vec<u8>>,
    pub failures: HashMap<String, StatusCode>,
}

impl Fixtures {
    /// A small slice of the public placeholder data set.
    pub fn seeded() -> Self {
        let posts = vec![
            Post {
                user_id: 1,
                id: 1,
                title: "sunt aut facere repellat provident".to_string(),
                body: "quia et suscipit suscipit recusandae".to_string(),
            },
            Post {
                user_id: 1,
                id: 2,
                title: "qui est esse".to_string(),
                body: "est rerum tempore vitae sequi sint".to_string(),
            },
        ];
        let users = vec![
            User {
                id: 1,
                name: "Leanne Graham".to_string(),
                username: "Bret".to_string(),
                email: "Sincere@april.biz".to_string(),
                phone: "1-770-736-8031 x56442".to_string(),
                website: "hildegard.org".to_string(),
            },
            User {
                id: 2,
                name: "Ervin Howell".to_string(),
                username: "Antonette".to_string(),
                email: "Shanna@melissa.tv".to_string(),
                phone: "010-692-6593 x09125".to_string(),
                website: "anastasia.net".to_string(),
            },
        ];
        let files = HashMap::from([("report.csv".to_string(), b"id,title\n1,qui est esse\n".to_vec())]);
        Self {
            posts,
            users,
            files,
            failures: HashMap::new(),
        }
    }

    /// Answer every request to `path` with `status`.
    pub fn fail(mut self, path: &str, status: u16) -> Self {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self.failures.insert(path.to_string(), status);
        self
    }

    pub fn file(mut self, name: &str, bytes: &[u8]) -> Self {
        self.files.insert(name.to_string(), bytes.to_vec());
        self
    }
}

pub type Db = Arc<Fixtures>;

pub fn app() -> Router {
    app_with(Fixtures::seeded())
}

pub fn app_with(fixtures: Fixtures) -> Router {
    let db: Db = Arc::new(fixtures);
    Router::new()
        .route("/posts", get(list_posts))
        .route("/users", get(list_users))
        .route("/files/{name}", get(download_file))
        .layer(middleware::from_fn_with_state(db.clone(), inject_failures))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Fixtures::seeded()).await
}

pub async fn run_with(listener: TcpListener, fixtures: Fixtures) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(fixtures)).await
}

async fn inject_failures(State(db): State<Db>, request: Request, next: Next) -> Response {
    if let Some(status) = db.failures.get(request.uri().path()) {
        tracing::debug!(path = request.uri().path(), %status, "injected failure");
        let body = serde_json::json!({ "code": status.as_u16(), "message": "injected failure" });
        return (*status, Json(body)).into_response();
    }
    next.run(request).await
}

async fn list_posts(State(db): State<Db>) -> Json<Vec<Post>> {
    Json(db.posts.clone())
}

async fn list_users(State(db): State<Db>) -> Json<Vec<User>> {
    Json(db.users.clone())
}

async fn download_file(
    State(db): State<Db>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    let bytes = db.files.get(&name).cloned().ok_or(StatusCode::NOT_FOUND)?;
    let headers = [
        (header::CONTENT_TYPE, "application/octet-stream".to_string()),
        (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{name}\"")),
    ];
    Ok((headers, bytes))
}
