use crate::auth::{login, signup};
use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, HeaderName, StatusCode, Uri},
    routing::post,
    Json, Router,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// A stand-in auth server that answers every request the same way and keeps
/// track of what it was sent.
#[derive(Debug, Clone)]
pub struct Canned {
    /// Status for every response
    status: StatusCode,

    /// Body for every response
    body: String,

    /// Every `(path, body)` received
    seen: Arc<Mutex<Vec<(String, Value)>>>,
}

impl Canned {
    /// Answer with a JSON body.
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self::text(status, &body.to_string())
    }

    /// Answer with whatever text you like, labelled as JSON.
    pub fn text(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Routes for both auth endpoints.
    pub fn router(&self) -> Router {
        Router::new()
            .route(signup::PATH, post(respond))
            .route(login::PATH, post(respond))
            .with_state(self.clone())
    }

    /// Every `(path, body)` we've been sent, in order.
    pub fn seen(&self) -> Vec<(String, Value)> {
        self.seen.lock().unwrap().clone()
    }
}

/// Record the request and send back the canned response.
async fn respond(
    State(canned): State<Canned>,
    uri: Uri,
    Json(body): Json<Value>,
) -> (StatusCode, [(HeaderName, &'static str); 1], String) {
    canned
        .seen
        .lock()
        .unwrap()
        .push((uri.path().to_string(), body));

    (
        canned.status,
        [(CONTENT_TYPE, "application/json")],
        canned.body.clone(),
    )
}

/// Serve a router on an ephemeral local port, returning the base URL.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{address}")
}

/// A base URL that nothing is listening on.
pub async fn nobody_home() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    format!("http://{address}")
}
