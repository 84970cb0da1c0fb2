//! HTTP surface of the room coordinator
//!
//! tiny_http accepts connections on a plain thread that feeds requests into
//! a channel; a tokio task dispatches each request onto a blocking worker.
//! Rooms are looked up through the shared directory, so requests for
//! different rooms run concurrently.

use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::net::SocketAddr;
use std::sync::Arc;
use std::thread;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tiny_http::{Header, Method, Request, Response, Server};
use tokio::sync::{mpsc, Notify};
use tracing::{debug, info, warn};

use protocol::{
    CreateRoomRequest, ErrorResponse, JoinRoomRequest, MoveRequest, ResetRequest,
};

use crate::config::ServerConfig;
use crate::room::{RoomDirectory, RoomError};

/// Largest accepted request body
const MAX_BODY_BYTES: usize = 64 * 1024;

type HttpResponse = Response<Cursor<Vec<u8>>>;

/// Handle for stopping a running server
#[derive(Clone)]
pub struct ShutdownHandle {
    notify: Arc<Notify>,
}

impl ShutdownHandle {
    /// Signal the server to shut down
    pub fn shutdown(&self) {
        self.notify.notify_waiters();
    }
}

/// Running coordinator instance
pub struct RoomServer {
    /// Actual bound address
    pub addr: SocketAddr,
    handle: tokio::task::JoinHandle<()>,
    shutdown: ShutdownHandle,
}

impl RoomServer {
    /// Signal shutdown
    pub fn shutdown(&self) {
        self.shutdown.shutdown();
    }

    /// Get a handle that can stop the server from elsewhere
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    /// Wait for the server task to finish
    pub async fn wait(self) -> anyhow::Result<()> {
        self.handle
            .await
            .map_err(|e| anyhow::anyhow!("server task panicked: {e}"))
    }
}

/// Bind the listener and spawn the accept, dispatch, and sweep tasks
pub fn start(config: ServerConfig, rooms: Arc<RoomDirectory>) -> anyhow::Result<RoomServer> {
    let server = Server::http(&config.bind_addr)
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {e}", config.bind_addr))?;
    let addr = server
        .server_addr()
        .to_ip()
        .ok_or_else(|| anyhow::anyhow!("unable to determine bound address"))?;
    let server = Arc::new(server);
    info!("Chess coordinator listening on {}", addr);

    let (tx, mut rx) = mpsc::channel::<Request>(16);
    let accept_server = server.clone();
    thread::spawn(move || {
        while let Ok(request) = accept_server.recv() {
            if tx.blocking_send(request).is_err() {
                break;
            }
        }
    });

    let shutdown_notify = Arc::new(Notify::new());
    let shutdown = ShutdownHandle {
        notify: shutdown_notify.clone(),
    };

    let sweep_rooms = rooms.clone();
    let sweep_notify = shutdown_notify.clone();
    let room_ttl = config.room_ttl;
    let sweep_interval = config.sweep_interval;
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_interval);
        loop {
            tokio::select! {
                _ = sweep_notify.notified() => break,
                _ = ticker.tick() => {
                    let purged = sweep_rooms.purge_idle(room_ttl);
                    if purged > 0 {
                        debug!("Idle sweep removed {} room(s)", purged);
                    }
                }
            }
        }
    });

    let handle = tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = shutdown_notify.notified() => break,
                maybe_request = rx.recv() => {
                    let Some(request) = maybe_request else { break };
                    let rooms = rooms.clone();
                    tokio::task::spawn_blocking(move || handle_request(request, &rooms));
                }
            }
        }
        server.unblock();
    });

    Ok(RoomServer {
        addr,
        handle,
        shutdown,
    })
}

/// Serve one request end to end
fn handle_request(mut request: Request, rooms: &RoomDirectory) {
    let method = request.method().clone();
    let url = request.url().to_string();
    debug!("{} {}", method, url);

    let response = route(&mut request, &method, &url, rooms);
    if let Err(e) = request.respond(response) {
        debug!("Failed to send response: {}", e);
    }
}

fn route(request: &mut Request, method: &Method, url: &str, rooms: &RoomDirectory) -> HttpResponse {
    let parsed = match url::Url::parse(&format!("http://localhost{url}")) {
        Ok(parsed) => parsed,
        Err(_) => return error_response(400, "Bad request"),
    };

    match (method, parsed.path()) {
        (Method::Post, "/api/chess/create") => handle_create(request, rooms),
        (Method::Post, "/api/chess/join") => handle_join(request, rooms),
        (Method::Post, "/api/chess/move") => handle_move(request, rooms),
        (Method::Post, "/api/chess/reset") => handle_reset(request, rooms),
        (Method::Get, "/api/chess/state") => {
            let params: HashMap<String, String> = parsed.query_pairs().into_owned().collect();
            handle_state(&params, rooms)
        }
        _ => error_response(404, "Not found"),
    }
}

fn handle_create(request: &mut Request, rooms: &RoomDirectory) -> HttpResponse {
    match parse_body::<CreateRoomRequest>(request) {
        Ok(body) => json_response(200, &rooms.create(body.state)),
        Err(response) => response,
    }
}

fn handle_join(request: &mut Request, rooms: &RoomDirectory) -> HttpResponse {
    match parse_body::<JoinRoomRequest>(request) {
        Ok(body) => respond_result(rooms.join(&body.room_id)),
        Err(response) => response,
    }
}

fn handle_move(request: &mut Request, rooms: &RoomDirectory) -> HttpResponse {
    match parse_body::<MoveRequest>(request) {
        Ok(body) => respond_result(rooms.submit_move(
            &body.room_id,
            body.moved_by,
            body.state,
            body.version,
        )),
        Err(response) => response,
    }
}

fn handle_reset(request: &mut Request, rooms: &RoomDirectory) -> HttpResponse {
    match parse_body::<ResetRequest>(request) {
        Ok(body) => respond_result(rooms.reset(&body.room_id)),
        Err(response) => response,
    }
}

fn handle_state(params: &HashMap<String, String>, rooms: &RoomDirectory) -> HttpResponse {
    match params.get("roomId") {
        Some(room_id) => respond_result(rooms.get_state(room_id)),
        None => error_response(400, "Missing roomId"),
    }
}

/// Read and deserialize a JSON body, or produce the error response
fn parse_body<T: DeserializeOwned>(request: &mut Request) -> Result<T, HttpResponse> {
    if request.body_length().unwrap_or(0) > MAX_BODY_BYTES {
        return Err(error_response(413, "Request body too large"));
    }

    let mut body = String::new();
    if let Err(e) = request.as_reader().read_to_string(&mut body) {
        warn!("Failed to read request body: {}", e);
        return Err(error_response(400, "Bad request"));
    }

    serde_json::from_str(&body).map_err(|e| {
        debug!("Malformed request body: {}", e);
        error_response(400, "Malformed request body")
    })
}

fn respond_result<T: Serialize>(result: crate::room::Result<T>) -> HttpResponse {
    match result {
        Ok(payload) => json_response(200, &payload),
        Err(err) => {
            let status = match err {
                RoomError::NotFound => 404,
                RoomError::RoomFull | RoomError::VersionConflict { .. } => 409,
            };
            error_response(status, &err.to_string())
        }
    }
}

fn json_response<T: Serialize>(status: u16, payload: &T) -> HttpResponse {
    let body = serde_json::to_string(payload).unwrap_or_else(|_| "{}".to_string());
    let mut response = Response::from_string(body).with_status_code(status);
    if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
        response = response.with_header(header);
    }
    response
}

fn error_response(status: u16, message: &str) -> HttpResponse {
    json_response(
        status,
        &ErrorResponse {
            error: message.to_string(),
        },
    )
}
