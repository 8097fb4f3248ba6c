//! In-process stand-in for the analysis service.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::Value;

/// What the fake service answers with.
#[derive(Clone)]
pub enum Reply {
    Json(Value),
    Raw(&'static str),
    Status(u16),
    Slow(Duration, Value),
}

#[derive(Clone)]
struct Shared {
    reply: Reply,
    seen: Arc<Mutex<Vec<Value>>>,
}

pub struct FakeService {
    pub addr: SocketAddr,
    seen: Arc<Mutex<Vec<Value>>>,
}

impl FakeService {
    pub fn endpoint(&self) -> String {
        format!("http://{}/analyze", self.addr)
    }

    /// Request bodies received so far.
    pub fn requests(&self) -> Vec<Value> {
        self.seen.lock().unwrap().clone()
    }
}

async fn analyze(State(shared): State<Shared>, Json(body): Json<Value>) -> Response {
    shared.seen.lock().unwrap().push(body);
    match shared.reply {
        Reply::Json(v) => Json(v).into_response(),
        Reply::Raw(text) => (StatusCode::OK, text).into_response(),
        Reply::Status(code) => StatusCode::from_u16(code).unwrap().into_response(),
        Reply::Slow(delay, v) => {
            tokio::time::sleep(delay).await;
            Json(v).into_response()
        }
    }
}

pub async fn spawn(reply: Reply) -> FakeService {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/analyze", post(analyze))
        .with_state(Shared {
            reply,
            seen: Arc::clone(&seen),
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    FakeService { addr, seen }
}

/// A consistent result for "the cat and the hat".
pub fn cat_hat() -> Value {
    serde_json::json!({
        "wordCount": 5,
        "uniqueWords": 4,
        "frequencies": [
            { "word": "the", "count": 2 },
            { "word": "cat", "count": 1 },
            { "word": "and", "count": 1 },
            { "word": "hat", "count": 1 }
        ]
    })
}
