//! Loopback block engine built on `warp`.
//!
//! Every POST is captured and answered with one canned status and body.
//! Requests are recorded before the reply is sent, so tests can inspect them
//! as soon as the client call returns.

#![allow(dead_code)]

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use warp::http::{HeaderMap, StatusCode};
use warp::path::FullPath;
use warp::Filter;

/// A request as the server saw it.
#[derive(Debug, Clone)]
pub struct Captured {
    pub path: String,
    pub query: String,
    pub headers: HeaderMap,
    pub body: Value,
}

impl Captured {
    /// Request target (path plus query string).
    pub fn target(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query)
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn json(&self) -> Value { self.body.clone() }
}

#[derive(Clone)]
struct Canned {
    status: StatusCode,
    body: String,
    delay: Duration,
    sink: Arc<Mutex<Vec<Captured>>>,
}

pub struct LoopbackServer {
    pub addr: SocketAddr,
    captured: Arc<Mutex<Vec<Captured>>>,
    task: JoinHandle<()>,
}

impl LoopbackServer {
    pub async fn start(status: u16, body: &str) -> Self {
        Self::start_with_delay(status, body, Duration::ZERO).await
    }

    pub async fn start_with_delay(status: u16, body: &str, delay: Duration) -> Self {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let canned = Canned {
            status: StatusCode::from_u16(status).expect("valid status code"),
            body: body.to_string(),
            delay,
            sink: captured.clone(),
        };

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind loopback");
        let addr = listener.local_addr().expect("local addr");
        let task = tokio::spawn(warp::serve(routes(canned)).incoming(listener).run());

        Self { addr, captured, task }
    }

    pub fn url(&self) -> String { format!("http://{}/api/v1/bundles", self.addr) }

    pub fn requests(&self) -> Vec<Captured> { self.captured.lock().expect("lock").clone() }
}

impl Drop for LoopbackServer {
    fn drop(&mut self) { self.task.abort(); }
}

fn routes(canned: Canned) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let canned = warp::any().map(move || canned.clone());
    let query = warp::query::raw().or(warp::any().map(String::new)).unify();

    warp::post()
        .and(warp::path::full())
        .and(query)
        .and(warp::header::headers_cloned())
        .and(warp::body::json())
        .and(canned)
        .and_then(handle_rpc_request)
}

async fn handle_rpc_request(
    path: FullPath,
    query: String,
    headers: HeaderMap,
    body: Value,
    canned: Canned,
) -> Result<impl warp::Reply, Infallible> {
    canned.sink.lock().expect("lock").push(Captured {
        path: path.as_str().to_string(),
        query,
        headers,
        body,
    });

    if !canned.delay.is_zero() {
        tokio::time::sleep(canned.delay).await;
    }

    let reply = warp::reply::with_header(canned.body, "content-type", "application/json");
    Ok(warp::reply::with_status(reply, canned.status))
}
